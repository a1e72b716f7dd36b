//! Driving ports for domain registration and listing.

use async_trait::async_trait;

use crate::domain::{Domain, DomainName, Error, Identity};

#[async_trait]
pub trait DomainsCommand: Send + Sync {
    /// Register `name` for the authenticated caller.
    async fn create_domain(&self, caller: &Identity, name: DomainName) -> Result<Domain, Error>;
}

#[async_trait]
pub trait DomainsQuery: Send + Sync {
    /// Domains owned by the caller, newest first.
    async fn list_domains(&self, caller: &Identity) -> Result<Vec<Domain>, Error>;
}
