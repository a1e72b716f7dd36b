//! HTTP server configuration object.

use std::net::SocketAddr;

use inkpress::inbound::http::session_config::SessionSettings;
use inkpress::outbound::identity::GoTrueIdentityProvider;
use inkpress::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for [`create_server`](super::create_server).
///
/// Without a pool the server keeps data in memory; without an identity
/// provider it signs users in through the fixture provider.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity: Option<GoTrueIdentityProvider>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            identity: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Persist users, domains, and pages in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Delegate sign-up and sign-in to a GoTrue-compatible service.
    #[must_use]
    pub fn with_identity(mut self, identity: GoTrueIdentityProvider) -> Self {
        self.identity = Some(identity);
        self
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
