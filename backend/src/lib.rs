//! Inkpress: multi-tenant markdown publishing.
//!
//! Users register domains, author markdown pages under them, and publish
//! pages that are then served as HTML at `/{domain}/{slug}`.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
