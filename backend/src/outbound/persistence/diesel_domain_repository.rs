//! PostgreSQL-backed `DomainRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{DomainRepository, DomainRepositoryError};
use crate::domain::{Domain, DomainId, NewDomain, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{DomainRow, NewDomainRow};
use super::pool::{DbPool, PoolError};
use super::schema::domains;

/// Diesel-backed implementation of the [`DomainRepository`] port.
#[derive(Clone)]
pub struct DieselDomainRepository {
    pool: DbPool,
}

impl DieselDomainRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DomainRepositoryError {
    DomainRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    name: Option<&str>,
) -> DomainRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation { .. } => {
            DomainRepositoryError::duplicate_name(name.unwrap_or_default())
        }
        DieselFailure::ForeignKeyViolation { constraint } => {
            if constraint.as_deref() != Some("domains_user_id_fkey") {
                warn!(?constraint, "unrecognised foreign key violation on domains");
            }
            DomainRepositoryError::OwnerMissing
        }
        DieselFailure::Connection(message) => DomainRepositoryError::connection(message),
        DieselFailure::Query(message) => DomainRepositoryError::query(message),
    }
}

fn into_domain(row: DomainRow) -> Result<Domain, DomainRepositoryError> {
    Domain::try_from(row).map_err(DomainRepositoryError::query)
}

#[async_trait]
impl DomainRepository for DieselDomainRepository {
    async fn create(&self, domain: &NewDomain) -> Result<Domain, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: DomainRow = diesel::insert_into(domains::table)
            .values(&NewDomainRow {
                id: *domain.id.as_uuid(),
                name: domain.name.as_ref(),
                user_id: *domain.user_id.as_uuid(),
            })
            .returning(DomainRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "create domain", Some(domain.name.as_ref())))?;

        into_domain(row)
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Domain>, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DomainRow> = domains::table
            .filter(domains::user_id.eq(owner.as_uuid()))
            .order(domains::created_at.desc())
            .select(DomainRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list domains", None))?;

        rows.into_iter().map(into_domain).collect()
    }

    async fn find_owned(
        &self,
        id: &DomainId,
        owner: &UserId,
    ) -> Result<Option<Domain>, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DomainRow> = domains::table
            .filter(domains::id.eq(id.as_uuid()))
            .filter(domains::user_id.eq(owner.as_uuid()))
            .select(DomainRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find owned domain", None))?;

        row.map(into_domain).transpose()
    }
}
