//! Service settings loaded via OrthoConfig.
//!
//! Every field can be set from the command line, a configuration file, or an
//! `INKPRESS_`-prefixed environment variable. Without a database URL the
//! service keeps its data in memory. Without an identity URL debug builds
//! sign users in through the fixture provider; release builds refuse to
//! start.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::inbound::http::session_config::BuildMode;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid identity service URL '{value}': {source}")]
    IdentityUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("INKPRESS_IDENTITY_URL is set but INKPRESS_IDENTITY_API_KEY is missing")]
    MissingIdentityApiKey,
    #[error("migrate_on_start requires a database URL")]
    MigrateWithoutDatabase,
    #[error("INKPRESS_IDENTITY_URL is required in release builds")]
    MissingIdentityService,
}

/// Identity service endpoint and project API key.
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub base_url: Url,
    pub api_key: String,
}

/// Top-level service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INKPRESS")]
pub struct AppSettings {
    /// Socket address to listen on. Defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Base URL of the GoTrue-compatible identity service.
    pub identity_url: Option<String>,
    /// Project API key sent with every identity request.
    pub identity_api_key: Option<String>,
    /// Apply pending migrations before serving traffic.
    #[ortho_config(default = false)]
    pub migrate_on_start: bool,
}

impl AppSettings {
    /// The listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let Some(url) = self.database_url.as_deref().filter(|url| !url.is_empty()) else {
            return if self.migrate_on_start {
                Err(SettingsError::MigrateWithoutDatabase)
            } else {
                Ok(None)
            };
        };
        let config = PoolConfig::new(url);
        Ok(Some(match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        }))
    }

    /// Identity service settings. `None` selects fixture sign-in, which
    /// only debug builds accept.
    pub fn identity(&self, mode: BuildMode) -> Result<Option<IdentitySettings>, SettingsError> {
        let Some(raw) = self.identity_url.as_deref().filter(|url| !url.is_empty()) else {
            return match mode {
                BuildMode::Debug => Ok(None),
                BuildMode::Release => Err(SettingsError::MissingIdentityService),
            };
        };
        let base_url = Url::parse(raw).map_err(|source| SettingsError::IdentityUrl {
            value: raw.to_owned(),
            source,
        })?;
        let api_key = self
            .identity_api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(SettingsError::MissingIdentityApiKey)?;
        Ok(Some(IdentitySettings { base_url, api_key }))
    }
}
