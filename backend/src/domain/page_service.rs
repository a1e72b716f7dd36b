//! Page authoring and public resolution use-cases.
//!
//! Ownership is always checked against the authenticated caller: page
//! creation looks the target domain up with the caller as a filter, and the
//! publish toggle is scoped the same way inside the repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::domain_service::map_domain_error;
use crate::domain::ports::{
    DomainRepository, PageRepository, PageRepositoryError, PagesCommand, PagesQuery,
    PublishedPageQuery,
};
use crate::domain::{
    DomainName, Error, Identity, NewPage, Page, PageDraft, PageId, PageListing, PageSlug,
};

fn map_page_error(error: PageRepositoryError) -> Error {
    match error {
        PageRepositoryError::DuplicateSlug { .. } => {
            Error::conflict("Page with this slug already exists for this domain")
        }
        PageRepositoryError::DomainMissing => Error::not_found("Domain not found"),
        PageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("page repository unavailable: {message}"))
        }
        PageRepositoryError::Query { message } => {
            Error::internal(format!("page repository error: {message}"))
        }
    }
}

/// Implements the page driving ports.
#[derive(Clone)]
pub struct PageService<D, P> {
    domains: Arc<D>,
    pages: Arc<P>,
}

impl<D, P> PageService<D, P> {
    pub fn new(domains: Arc<D>, pages: Arc<P>) -> Self {
        Self { domains, pages }
    }
}

#[async_trait]
impl<D, P> PagesCommand for PageService<D, P>
where
    D: DomainRepository,
    P: PageRepository,
{
    async fn create_page(&self, caller: &Identity, draft: PageDraft) -> Result<Page, Error> {
        let owned = self
            .domains
            .find_owned(&draft.domain_id, &caller.id)
            .await
            .map_err(map_domain_error)?;
        if owned.is_none() {
            return Err(Error::forbidden("Domain not found or unauthorized"));
        }

        let page = self
            .pages
            .create(&NewPage::from(draft))
            .await
            .map_err(map_page_error)?;
        info!(page_id = %page.id, domain_id = %page.domain_id, slug = %page.slug, "page created");
        Ok(page)
    }

    async fn toggle_published(&self, caller: &Identity, page_id: &PageId) -> Result<Page, Error> {
        let page = self
            .pages
            .toggle_published(page_id, &caller.id)
            .await
            .map_err(map_page_error)?
            .ok_or_else(|| Error::not_found("Not found"))?;
        info!(page_id = %page.id, published = page.published, "page visibility toggled");
        Ok(page)
    }
}

#[async_trait]
impl<D, P> PagesQuery for PageService<D, P>
where
    D: DomainRepository,
    P: PageRepository,
{
    async fn list_pages(&self, caller: &Identity) -> Result<Vec<PageListing>, Error> {
        self.pages
            .list_for_owner(&caller.id)
            .await
            .map_err(map_page_error)
    }
}

#[async_trait]
impl<D, P> PublishedPageQuery for PageService<D, P>
where
    D: DomainRepository,
    P: PageRepository,
{
    async fn find_published(
        &self,
        domain: &DomainName,
        slug: &PageSlug,
    ) -> Result<Option<Page>, Error> {
        self.pages
            .find_published(domain, slug)
            .await
            .map_err(map_page_error)
    }
}
