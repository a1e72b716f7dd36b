//! Driving port for sign-up, sign-in, and session resolution.
//!
//! Inbound adapters call this port and store the returned token in whatever
//! session envelope they use; the port never touches cookies.

use async_trait::async_trait;

use crate::domain::{AuthSession, Credentials, Error, Identity, SessionToken};

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Create an account, mirror its user record, and open a session.
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, Error>;

    /// Open a session for an existing account.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, Error>;

    /// Resolve a stored token; `None` means the session is no longer valid.
    async fn identify(&self, token: &SessionToken) -> Result<Option<Identity>, Error>;

    /// Revoke a session. Provider failures are logged, not surfaced.
    async fn sign_out(&self, token: &SessionToken);
}
