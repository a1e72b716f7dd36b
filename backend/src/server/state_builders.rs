//! Assembly of [`HttpState`] from the configured adapters.

use std::sync::Arc;

use tracing::info;

use inkpress::domain::ports::{
    DomainRepository, FixtureIdentityProvider, IdentityProvider, PageRepository, UserRepository,
};
use inkpress::domain::{AuthService, DomainService, PageService, UserRegistryService};
use inkpress::inbound::http::state::HttpState;
use inkpress::outbound::memory::MemoryStore;
use inkpress::outbound::persistence::{
    DieselDomainRepository, DieselPageRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Repositories backing every service.
struct Repositories<U, D, P> {
    users: Arc<U>,
    domains: Arc<D>,
    pages: Arc<P>,
}

fn assemble<I, U, D, P>(identity: Arc<I>, repos: Repositories<U, D, P>) -> HttpState
where
    I: IdentityProvider + 'static,
    U: UserRepository + 'static,
    D: DomainRepository + 'static,
    P: PageRepository + 'static,
{
    let Repositories {
        users,
        domains,
        pages,
    } = repos;
    let domain_service = Arc::new(DomainService::new(domains.clone(), users.clone()));
    let page_service = Arc::new(PageService::new(domains, pages));
    HttpState {
        sessions: Arc::new(AuthService::new(identity, users.clone())),
        users: Arc::new(UserRegistryService::new(users)),
        domains: domain_service.clone(),
        domains_query: domain_service,
        pages: page_service.clone(),
        pages_query: page_service.clone(),
        published: page_service,
    }
}

fn with_identity<U, D, P>(config: &ServerConfig, repos: Repositories<U, D, P>) -> HttpState
where
    U: UserRepository + 'static,
    D: DomainRepository + 'static,
    P: PageRepository + 'static,
{
    match &config.identity {
        Some(provider) => assemble(Arc::new(provider.clone()), repos),
        None => {
            info!("no identity service configured; using fixture sign-in");
            assemble(Arc::new(FixtureIdentityProvider), repos)
        }
    }
}

/// Build handler state: Diesel repositories when a pool is configured,
/// otherwise one shared in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => with_identity(
            config,
            Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                domains: Arc::new(DieselDomainRepository::new(pool.clone())),
                pages: Arc::new(DieselPageRepository::new(pool.clone())),
            },
        ),
        None => {
            info!("no database configured; data is kept in memory");
            let store = Arc::new(MemoryStore::new());
            with_identity(
                config,
                Repositories {
                    users: store.clone(),
                    domains: store.clone(),
                    pages: store,
                },
            )
        }
    }
}
