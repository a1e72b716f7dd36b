//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DomainsCommand, DomainsQuery, PagesCommand, PagesQuery, PublishedPageQuery, SessionService,
    UserRegistry,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use inkpress::domain::ports::FixtureIdentityProvider;
/// use inkpress::domain::{AuthService, DomainService, PageService, UserRegistryService};
/// use inkpress::inbound::http::state::HttpState;
/// use inkpress::outbound::memory::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new());
/// let pages = Arc::new(PageService::new(store.clone(), store.clone()));
/// let domains = Arc::new(DomainService::new(store.clone(), store.clone()));
/// let state = HttpState {
///     sessions: Arc::new(AuthService::new(Arc::new(FixtureIdentityProvider), store.clone())),
///     users: Arc::new(UserRegistryService::new(store.clone())),
///     domains: domains.clone(),
///     domains_query: domains,
///     pages: pages.clone(),
///     pages_query: pages.clone(),
///     published: pages,
/// };
/// let _sessions = state.sessions.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub sessions: Arc<dyn SessionService>,
    pub users: Arc<dyn UserRegistry>,
    pub domains: Arc<dyn DomainsCommand>,
    pub domains_query: Arc<dyn DomainsQuery>,
    pub pages: Arc<dyn PagesCommand>,
    pub pages_query: Arc<dyn PagesQuery>,
    pub published: Arc<dyn PublishedPageQuery>,
}
