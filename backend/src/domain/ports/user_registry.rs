//! Driving port for mirroring identity provider users locally.

use async_trait::async_trait;

use crate::domain::{Error, User};

#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Idempotently record `user`, returning the stored row.
    ///
    /// Registering an id that already exists leaves the stored email as is.
    async fn register(&self, user: &User) -> Result<User, Error>;
}
