//! Domain primitives, ports, and services.
//!
//! Purpose: define strongly typed entities (users, domains, pages), the
//! ports adapters implement, and the services that enforce ownership rules.
//! Nothing in this module depends on HTTP or SQL.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`User`], [`Domain`], [`Page`]: persisted entities.
//! - [`DomainName`], [`PageSlug`], [`PageTitle`], [`Email`]: validated inputs.
//! - [`AuthService`], [`DomainService`], [`PageService`],
//!   [`UserRegistryService`]: use-case implementations.

mod auth_service;
mod domain_service;
pub mod error;
mod identity;
pub(crate) mod ids;
mod page;
mod page_service;
pub mod ports;
mod tenant_domain;
mod trace_id;
mod user;
mod user_registry_service;

pub use self::auth_service::AuthService;
pub use self::domain_service::DomainService;
pub use self::error::{Error, ErrorCode};
pub use self::identity::{
    AuthSession, Credentials, CredentialsValidationError, Identity, PASSWORD_MIN, SessionToken,
};
pub use self::ids::InvalidId;
pub use self::page::{
    NewPage, Page, PageDraft, PageId, PageListing, PageSlug, PageTitle, PageValidationError,
};
pub use self::page_service::PageService;
pub use self::tenant_domain::{
    DOMAIN_LABEL_MAX, DOMAIN_NAME_MAX, Domain, DomainId, DomainName, DomainNameValidationError,
    DomainSummary, NewDomain,
};
pub use self::trace_id::TraceId;
pub use self::user::{EMAIL_MAX, Email, EmailValidationError, User, UserId};
pub use self::user_registry_service::UserRegistryService;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
