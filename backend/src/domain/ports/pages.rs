//! Driving ports for page authoring and public resolution.

use async_trait::async_trait;

use crate::domain::{
    DomainName, Error, Identity, Page, PageDraft, PageId, PageListing, PageSlug,
};

#[async_trait]
pub trait PagesCommand: Send + Sync {
    /// Create an unpublished page under a domain the caller owns.
    async fn create_page(&self, caller: &Identity, draft: PageDraft) -> Result<Page, Error>;

    /// Flip the published flag of a page the caller owns.
    async fn toggle_published(&self, caller: &Identity, page_id: &PageId) -> Result<Page, Error>;
}

#[async_trait]
pub trait PagesQuery: Send + Sync {
    /// Pages across all of the caller's domains, newest first.
    async fn list_pages(&self, caller: &Identity) -> Result<Vec<PageListing>, Error>;
}

#[async_trait]
pub trait PublishedPageQuery: Send + Sync {
    /// Published page at `domain/slug`, or `None`.
    async fn find_published(
        &self,
        domain: &DomainName,
        slug: &PageSlug,
    ) -> Result<Option<Page>, Error>;
}
