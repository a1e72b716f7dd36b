//! Driven port for domain persistence.
//!
//! Every read that feeds an authorisation decision takes the caller's
//! [`UserId`] as a filter so adapters never return another tenant's rows.

use async_trait::async_trait;

use crate::domain::{Domain, DomainId, NewDomain, UserId};

/// Persistence errors raised by domain repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainRepositoryError {
    /// The normalised name is already registered.
    #[error("domain name already registered: {name}")]
    DuplicateName { name: String },
    /// The owning user row does not exist.
    #[error("domain owner does not exist")]
    OwnerMissing,
    #[error("domain repository connection failed: {message}")]
    Connection { message: String },
    #[error("domain repository query failed: {message}")]
    Query { message: String },
}

impl DomainRepositoryError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
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
pub trait DomainRepository: Send + Sync {
    /// Insert a new unverified domain.
    async fn create(&self, domain: &NewDomain) -> Result<Domain, DomainRepositoryError>;

    /// Domains owned by `owner`, newest first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Domain>, DomainRepositoryError>;

    /// Fetch `id` only if it belongs to `owner`.
    async fn find_owned(
        &self,
        id: &DomainId,
        owner: &UserId,
    ) -> Result<Option<Domain>, DomainRepositoryError>;
}
