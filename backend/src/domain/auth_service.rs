//! Session use-cases backed by the identity provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{IdentityProvider, IdentityProviderError, SessionService, UserRepository};
use crate::domain::user_registry_service::map_user_persistence_error;
use crate::domain::{AuthSession, Credentials, Error, Identity, SessionToken, User};

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => {
            Error::unauthorized("Invalid email or password")
        }
        IdentityProviderError::Rejected { message } => Error::invalid_request(message),
        IdentityProviderError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityProviderError::Protocol { message } => {
            Error::internal(format!("identity provider error: {message}"))
        }
    }
}

/// [`SessionService`] that delegates credentials to an [`IdentityProvider`]
/// and mirrors new accounts into the user table.
#[derive(Clone)]
pub struct AuthService<I, U> {
    identity: Arc<I>,
    users: Arc<U>,
}

impl<I, U> AuthService<I, U> {
    pub fn new(identity: Arc<I>, users: Arc<U>) -> Self {
        Self { identity, users }
    }
}

#[async_trait]
impl<I, U> SessionService for AuthService<I, U>
where
    I: IdentityProvider,
    U: UserRepository,
{
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, Error> {
        let session = self
            .identity
            .sign_up(credentials)
            .await
            .map_err(map_identity_error)?;
        let Identity { id, email } = session.identity.clone();
        self.users
            .upsert(&User::new(id, email))
            .await
            .map_err(map_user_persistence_error)?;
        Ok(session)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, Error> {
        self.identity
            .sign_in(credentials)
            .await
            .map_err(map_identity_error)
    }

    async fn identify(&self, token: &SessionToken) -> Result<Option<Identity>, Error> {
        self.identity
            .resolve(token)
            .await
            .map_err(map_identity_error)
    }

    async fn sign_out(&self, token: &SessionToken) {
        if let Err(error) = self.identity.sign_out(token).await {
            warn!(%error, "identity provider sign-out failed; session cleared locally");
        }
    }
}
