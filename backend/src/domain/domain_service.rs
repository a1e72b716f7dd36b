//! Domain registration use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    DomainRepository, DomainRepositoryError, DomainsCommand, DomainsQuery, UserRepository,
};
use crate::domain::user_registry_service::map_user_persistence_error;
use crate::domain::{Domain, DomainName, Error, Identity, NewDomain, User};

pub(crate) fn map_domain_error(error: DomainRepositoryError) -> Error {
    match error {
        DomainRepositoryError::DuplicateName { .. } => Error::conflict("Domain already exists"),
        DomainRepositoryError::OwnerMissing => {
            Error::internal("domain owner missing from user table")
        }
        DomainRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("domain repository unavailable: {message}"))
        }
        DomainRepositoryError::Query { message } => {
            Error::internal(format!("domain repository error: {message}"))
        }
    }
}

/// Implements [`DomainsCommand`] and [`DomainsQuery`].
#[derive(Clone)]
pub struct DomainService<D, U> {
    domains: Arc<D>,
    users: Arc<U>,
}

impl<D, U> DomainService<D, U> {
    pub fn new(domains: Arc<D>, users: Arc<U>) -> Self {
        Self { domains, users }
    }
}

#[async_trait]
impl<D, U> DomainsCommand for DomainService<D, U>
where
    D: DomainRepository,
    U: UserRepository,
{
    async fn create_domain(&self, caller: &Identity, name: DomainName) -> Result<Domain, Error> {
        // The owner row must exist before the domain can reference it.
        self.users
            .upsert(&User::new(caller.id, caller.email.clone()))
            .await
            .map_err(map_user_persistence_error)?;

        let domain = self
            .domains
            .create(&NewDomain::new(name, caller.id))
            .await
            .map_err(map_domain_error)?;
        info!(domain_id = %domain.id, name = %domain.name, "domain registered");
        Ok(domain)
    }
}

#[async_trait]
impl<D, U> DomainsQuery for DomainService<D, U>
where
    D: DomainRepository,
    U: UserRepository,
{
    async fn list_domains(&self, caller: &Identity) -> Result<Vec<Domain>, Error> {
        self.domains
            .list_for_owner(&caller.id)
            .await
            .map_err(map_domain_error)
    }
}
