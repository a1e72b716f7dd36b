//! Custom domains owned by users.
//!
//! A domain is the namespace pages are published under. Names are globally
//! unique and stored in normalised (trimmed, lowercase) form so that public
//! resolution and uniqueness checks agree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;
use super::ids::define_uuid_id;

define_uuid_id!(
    /// Identifier of a registered domain.
    DomainId,
    "domain id"
);

/// Maximum length of a DNS name in presentation format.
pub const DOMAIN_NAME_MAX: usize = 253;
/// Maximum length of one dot-separated label.
pub const DOMAIN_LABEL_MAX: usize = 63;

/// Validation errors for [`DomainName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainNameValidationError {
    #[error("Domain name is required")]
    Empty,
    #[error("domain name must be at most {max} characters")]
    TooLong { max: usize },
    #[error("domain name may only contain letters, numbers, dots, and hyphens")]
    InvalidCharacters,
    #[error("domain name must not start or end with a dot or hyphen")]
    InvalidBoundary,
    #[error("domain name labels must be 1 to {max} characters and not start or end with a hyphen")]
    InvalidLabel { max: usize },
}

/// Normalised hostname.
///
/// Input is trimmed and lowercased before validation, so `"Example.com "`
/// and `"example.com"` name the same domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "example.com")]
pub struct DomainName(String);

impl DomainName {
    /// Normalise and validate a domain name.
    ///
    /// # Examples
    /// ```
    /// use inkpress::domain::DomainName;
    ///
    /// let name = DomainName::new("Example.com ").expect("valid name");
    /// assert_eq!(name.as_ref(), "example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainNameValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(DomainNameValidationError::Empty);
        }
        if normalised.len() > DOMAIN_NAME_MAX {
            return Err(DomainNameValidationError::TooLong {
                max: DOMAIN_NAME_MAX,
            });
        }
        if !normalised
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
        {
            return Err(DomainNameValidationError::InvalidCharacters);
        }
        let at_boundary = |c: char| c == '.' || c == '-';
        if normalised.starts_with(at_boundary) || normalised.ends_with(at_boundary) {
            return Err(DomainNameValidationError::InvalidBoundary);
        }
        let bad_label = |label: &str| {
            label.is_empty()
                || label.len() > DOMAIN_LABEL_MAX
                || label.starts_with('-')
                || label.ends_with('-')
        };
        if normalised.split('.').any(bad_label) {
            return Err(DomainNameValidationError::InvalidLabel {
                max: DOMAIN_LABEL_MAX,
            });
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainNameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: DomainId,
    pub name: DomainName,
    /// Owning user; the only actor allowed to create pages under the domain.
    pub user_id: UserId,
    /// Whether DNS ownership has been verified. Always `false` on creation.
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert request for a new domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDomain {
    pub id: DomainId,
    pub name: DomainName,
    pub user_id: UserId,
}

impl NewDomain {
    /// Prepare an unverified domain owned by `user_id` with a fresh identifier.
    #[must_use]
    pub fn new(name: DomainName, user_id: UserId) -> Self {
        Self {
            id: DomainId::random(),
            name,
            user_id,
        }
    }
}

/// Minimal domain view embedded in page listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DomainSummary {
    pub id: DomainId,
    pub name: DomainName,
}
