//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`]) are implemented by
//! outbound adapters. Driving ports (use-cases) are called by inbound
//! adapters. Each driven port exposes a typed error enum so services map
//! adapter failures predictably.

mod domain_repository;
mod domains;
mod identity_provider;
mod page_repository;
mod pages;
mod session_service;
mod user_registry;
mod user_repository;

#[cfg(test)]
pub use domain_repository::MockDomainRepository;
pub use domain_repository::{DomainRepository, DomainRepositoryError};
pub use domains::{DomainsCommand, DomainsQuery};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use page_repository::MockPageRepository;
pub use page_repository::{PageRepository, PageRepositoryError};
pub use pages::{PagesCommand, PagesQuery, PublishedPageQuery};
pub use session_service::SessionService;
pub use user_registry::UserRegistry;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
