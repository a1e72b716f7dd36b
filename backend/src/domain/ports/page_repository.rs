//! Driven port for page persistence.

use async_trait::async_trait;

use crate::domain::{DomainName, NewPage, Page, PageId, PageListing, PageSlug, UserId};

/// Persistence errors raised by page repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRepositoryError {
    /// The slug is already taken within the target domain.
    #[error("slug already used in domain: {slug}")]
    DuplicateSlug { slug: String },
    /// The referenced domain no longer exists.
    #[error("page domain does not exist")]
    DomainMissing,
    #[error("page repository connection failed: {message}")]
    Connection { message: String },
    #[error("page repository query failed: {message}")]
    Query { message: String },
}

impl PageRepositoryError {
    pub fn duplicate_slug(slug: impl Into<String>) -> Self {
        Self::DuplicateSlug { slug: slug.into() }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Insert a new unpublished page.
    async fn create(&self, page: &NewPage) -> Result<Page, PageRepositoryError>;

    /// Pages across every domain owned by `owner`, newest first.
    async fn list_for_owner(&self, owner: &UserId)
    -> Result<Vec<PageListing>, PageRepositoryError>;

    /// Invert the published flag of `id` if its domain belongs to `owner`.
    ///
    /// Returns `None` when the page does not exist or is owned by someone
    /// else. The ownership check and the flip happen in one statement.
    async fn toggle_published(
        &self,
        id: &PageId,
        owner: &UserId,
    ) -> Result<Option<Page>, PageRepositoryError>;

    /// Published page with `slug` under the domain called `domain`.
    async fn find_published(
        &self,
        domain: &DomainName,
        slug: &PageSlug,
    ) -> Result<Option<Page>, PageRepositoryError>;
}
