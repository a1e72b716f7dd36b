//! PostgreSQL-backed `PageRepository`.
//!
//! Ownership filters are expressed in SQL: listings join through `domains`
//! on the owner, and the publish toggle restricts its `UPDATE` to pages whose
//! domain belongs to the caller.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{PageRepository, PageRepositoryError};
use crate::domain::{
    DomainName, DomainSummary, NewPage, Page, PageId, PageListing, PageSlug, UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{DomainSummaryRow, NewPageRow, PageRow};
use super::pool::{DbPool, PoolError};
use super::schema::{domains, pages};

/// Diesel-backed implementation of the [`PageRepository`] port.
#[derive(Clone)]
pub struct DieselPageRepository {
    pool: DbPool,
}

impl DieselPageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PageRepositoryError {
    PageRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    slug: Option<&str>,
) -> PageRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation { .. } => {
            PageRepositoryError::duplicate_slug(slug.unwrap_or_default())
        }
        DieselFailure::ForeignKeyViolation { constraint } => {
            if constraint.as_deref() != Some("pages_domain_id_fkey") {
                warn!(?constraint, "unrecognised foreign key violation on pages");
            }
            PageRepositoryError::DomainMissing
        }
        DieselFailure::Connection(message) => PageRepositoryError::connection(message),
        DieselFailure::Query(message) => PageRepositoryError::query(message),
    }
}

fn into_page(row: PageRow) -> Result<Page, PageRepositoryError> {
    Page::try_from(row).map_err(PageRepositoryError::query)
}

fn into_listing(
    (page, domain): (PageRow, DomainSummaryRow),
) -> Result<PageListing, PageRepositoryError> {
    Ok(PageListing {
        page: into_page(page)?,
        domain: DomainSummary::try_from(domain).map_err(PageRepositoryError::query)?,
    })
}

#[async_trait]
impl PageRepository for DieselPageRepository {
    async fn create(&self, page: &NewPage) -> Result<Page, PageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: PageRow = diesel::insert_into(pages::table)
            .values(&NewPageRow {
                id: *page.id.as_uuid(),
                title: page.title.as_ref(),
                slug: page.slug.as_ref(),
                content: &page.content,
                domain_id: *page.domain_id.as_uuid(),
            })
            .returning(PageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "create page", Some(page.slug.as_ref())))?;

        into_page(row)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<PageListing>, PageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PageRow, DomainSummaryRow)> = pages::table
            .inner_join(domains::table)
            .filter(domains::user_id.eq(owner.as_uuid()))
            .order(pages::created_at.desc())
            .select((PageRow::as_select(), DomainSummaryRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list pages", None))?;

        rows.into_iter().map(into_listing).collect()
    }

    async fn toggle_published(
        &self,
        id: &PageId,
        owner: &UserId,
    ) -> Result<Option<Page>, PageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owned_domains = domains::table
            .filter(domains::user_id.eq(*owner.as_uuid()))
            .select(domains::id);

        let row: Option<PageRow> = diesel::update(
            pages::table
                .filter(pages::id.eq(*id.as_uuid()))
                .filter(pages::domain_id.eq_any(owned_domains)),
        )
        .set(pages::published.eq(diesel::dsl::not(pages::published)))
        .returning(PageRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, "toggle page", None))?;

        row.map(into_page).transpose()
    }

    async fn find_published(
        &self,
        domain: &DomainName,
        slug: &PageSlug,
    ) -> Result<Option<Page>, PageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PageRow> = pages::table
            .inner_join(domains::table)
            .filter(domains::name.eq(domain.as_ref()))
            .filter(pages::slug.eq(slug.as_ref()))
            .filter(pages::published.eq(true))
            .select(PageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find published page", None))?;

        row.map(into_page).transpose()
    }
}
