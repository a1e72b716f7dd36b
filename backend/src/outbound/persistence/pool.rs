//! bb8 pool of `diesel-async` Postgres connections.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Connection borrowed from a [`DbPool`].
pub type Connection<'a> = PooledConnection<'a, AsyncPgConnection>;

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("database pool could not be built: {0}")]
    Build(String),
    /// No connection became free before the checkout timeout.
    #[error("no database connection available: {0}")]
    Checkout(String),
}

impl PoolError {
    /// Underlying cause without the variant wording.
    #[must_use]
    pub fn into_message(self) -> String {
        match self {
            Self::Build(cause) | Self::Checkout(cause) => cause,
        }
    }
}

/// Pool sizing and timeouts.
///
/// ```
/// use std::time::Duration;
/// use inkpress::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://inkpress@localhost/inkpress").with_max_size(4);
/// assert_eq!(config.max_size(), 4);
/// assert_eq!(config.checkout_timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Zero is raised to one.
    #[must_use]
    pub fn with_max_size(self, max_size: u32) -> Self {
        Self {
            max_size: max_size.max(1),
            ..self
        }
    }

    #[must_use]
    pub fn with_checkout_timeout(self, checkout_timeout: Duration) -> Self {
        Self {
            checkout_timeout,
            ..self
        }
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    #[must_use]
    pub fn checkout_timeout(&self) -> Duration {
        self.checkout_timeout
    }
}

/// Shared handle; clones refer to the same pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. Connections are opened lazily.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when bb8 rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map(|inner| Self { inner })
            .map_err(|err| PoolError::Build(err.to_string()))
    }

    /// Borrow a connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when the database is unreachable or the pool
    /// stays exhausted past the checkout timeout.
    pub async fn get(&self) -> Result<Connection<'_>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::Checkout(err.to_string()))
    }
}
