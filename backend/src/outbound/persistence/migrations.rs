//! Embedded schema migrations.
//!
//! `diesel_migrations` needs a synchronous connection, so migrations run on a
//! blocking thread with a dedicated `PgConnection` rather than through the
//! async pool.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::TraceId;

/// Migrations compiled into the binary from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    #[error("migration task panicked or was cancelled: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn run_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    Ok(applied.len())
}

/// Apply pending migrations and return how many ran.
///
/// # Errors
///
/// Returns [`MigrationError`] when the connection fails or a migration is
/// rejected by the database.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let trace_id = TraceId::current();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&url)).await??;
    info!(applied, trace_id = ?trace_id.map(|id| id.to_string()), "database migrations applied");
    Ok(applied)
}
