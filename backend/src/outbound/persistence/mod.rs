//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports, backed by PostgreSQL
//! through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Ownership rules are expressed as query filters.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: constraint violations map onto the port error enums
//!   (duplicate name or slug, missing owner or domain).
//!
//! # Example
//!
//! ```no_run
//! use inkpress::outbound::persistence::{DbPool, DieselDomainRepository, PoolConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/inkpress")).await?;
//! let domains = DieselDomainRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_domain_repository;
mod diesel_error_mapping;
mod diesel_page_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_domain_repository::DieselDomainRepository;
pub use diesel_page_repository::DieselPageRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
