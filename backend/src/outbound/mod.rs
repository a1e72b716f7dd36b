//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel with an async pool.
//! - **memory**: process-local repositories for development and tests.
//! - **identity**: GoTrue-compatible identity provider over HTTP.
//!
//! Adapters translate between domain types and storage or wire formats and
//! carry no business rules.

pub mod identity;
pub mod memory;
pub mod persistence;
