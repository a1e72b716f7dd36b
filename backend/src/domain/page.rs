//! Markdown pages published under a domain.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::define_uuid_id;
use super::{DomainId, DomainSummary};

define_uuid_id!(
    /// Identifier of a page.
    PageId,
    "page id"
);

/// Validation errors for page fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Slug is required")]
    EmptySlug,
    #[error("Slug can only contain lowercase letters, numbers, hyphens, and underscores")]
    InvalidSlug,
}

/// Trimmed, non-empty page title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "About")]
pub struct PageTitle(String);

impl PageTitle {
    /// Trim and validate a title.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PageValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PageValidationError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PageTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PageTitle> for String {
    fn from(value: PageTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for PageTitle {
    type Error = PageValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_RE.get_or_init(|| {
        Regex::new("^[a-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("slug regex failed to compile: {error}"))
    })
}

/// URL path segment identifying a page within its domain.
///
/// Input is trimmed and lowercased, then must match `[a-z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "about-us")]
pub struct PageSlug(String);

impl PageSlug {
    /// Normalise and validate a slug.
    ///
    /// # Examples
    /// ```
    /// use inkpress::domain::PageSlug;
    ///
    /// assert_eq!(PageSlug::new(" Hello_World ").expect("valid").as_ref(), "hello_world");
    /// assert!(PageSlug::new("About Us").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PageValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(PageValidationError::EmptySlug);
        }
        if !slug_regex().is_match(&normalised) {
            return Err(PageValidationError::InvalidSlug);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for PageSlug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for PageSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PageSlug> for String {
    fn from(value: PageSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for PageSlug {
    type Error = PageValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub title: PageTitle,
    pub slug: PageSlug,
    /// Markdown source; may be empty.
    pub content: String,
    pub published: bool,
    pub domain_id: DomainId,
    pub created_at: DateTime<Utc>,
}

/// Insert request for a new, unpublished page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub id: PageId,
    pub title: PageTitle,
    pub slug: PageSlug,
    pub content: String,
    pub domain_id: DomainId,
}

/// Validated input for the create-page use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDraft {
    pub title: PageTitle,
    pub slug: PageSlug,
    pub content: String,
    pub domain_id: DomainId,
}

impl From<PageDraft> for NewPage {
    fn from(draft: PageDraft) -> Self {
        let PageDraft {
            title,
            slug,
            content,
            domain_id,
        } = draft;
        Self {
            id: PageId::random(),
            title,
            slug,
            content,
            domain_id,
        }
    }
}

/// Page with its owning domain, as returned by owner listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageListing {
    #[serde(flatten)]
    pub page: Page,
    pub domain: DomainSummary,
}
