//! Driven port for the external identity provider.
//!
//! Credentials, token issuance, and password storage live in the provider;
//! this service only exchanges credentials for opaque session tokens and
//! resolves tokens back to identities.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AuthSession, Credentials, Email, Identity, SessionToken, UserId};

/// Errors raised by identity provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityProviderError {
    /// Email and password did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The provider refused the request (duplicate account, weak password).
    #[error("identity provider rejected the request: {message}")]
    Rejected { message: String },
    /// The provider could not be reached.
    #[error("identity provider unavailable: {message}")]
    Unavailable { message: String },
    /// The provider answered with something this adapter cannot interpret.
    #[error("identity provider protocol error: {message}")]
    Protocol { message: String },
}

impl IdentityProviderError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account and open a session for it.
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, IdentityProviderError>;

    /// Exchange credentials for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, IdentityProviderError>;

    /// Resolve a token to its identity; `None` when the token is unknown or
    /// expired.
    async fn resolve(&self, token: &SessionToken)
    -> Result<Option<Identity>, IdentityProviderError>;

    /// Revoke the session behind `token`.
    async fn sign_out(&self, token: &SessionToken) -> Result<(), IdentityProviderError>;
}

const FIXTURE_PASSWORD: &str = "password";
const FIXTURE_TOKEN_PREFIX: &str = "fixture.";
const FIXTURE_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a0e_5d3b_4c8e_9a47_b2d1_e0f3_a915);

/// Stateless provider for local development and tests.
///
/// Any well-formed email signs in with the password `password`. The user id
/// is a name-based UUID of the email, and tokens encode `id:email`, so
/// identities survive restarts without any storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    /// Deterministic user id for `email`.
    #[must_use]
    pub fn user_id_for(email: &Email) -> UserId {
        UserId::from_uuid(Uuid::new_v5(&FIXTURE_NAMESPACE, email.as_ref().as_bytes()))
    }

    fn session_for(email: &Email) -> AuthSession {
        let id = Self::user_id_for(email);
        let token = SessionToken::new(format!("{FIXTURE_TOKEN_PREFIX}{id}:{email}"));
        AuthSession {
            identity: Identity {
                id,
                email: email.clone(),
            },
            token,
        }
    }

    fn authenticate(credentials: &Credentials) -> Result<AuthSession, IdentityProviderError> {
        if credentials.password() == FIXTURE_PASSWORD {
            Ok(Self::session_for(credentials.email()))
        } else {
            Err(IdentityProviderError::InvalidCredentials)
        }
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, IdentityProviderError> {
        if credentials.password() != FIXTURE_PASSWORD {
            return Err(IdentityProviderError::rejected(
                "fixture accounts must use the password 'password'",
            ));
        }
        Self::authenticate(credentials)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, IdentityProviderError> {
        Self::authenticate(credentials)
    }

    async fn resolve(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Identity>, IdentityProviderError> {
        let Some(rest) = token.expose().strip_prefix(FIXTURE_TOKEN_PREFIX) else {
            return Ok(None);
        };
        let Some((raw_id, raw_email)) = rest.split_once(':') else {
            return Ok(None);
        };
        let (Ok(id), Ok(email)) = (UserId::new(raw_id), Email::new(raw_email)) else {
            return Ok(None);
        };
        if Self::user_id_for(&email) != id {
            return Ok(None);
        }
        Ok(Some(Identity { id, email }))
    }

    async fn sign_out(&self, _token: &SessionToken) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(email, password).expect("credential shape")
    }

    #[rstest]
    #[tokio::test]
    async fn sign_in_then_resolve_round_trips() {
        let provider = FixtureIdentityProvider;
        let session = provider
            .sign_in(&credentials("ada@example.com", "password"))
            .await
            .expect("fixture sign in");

        let resolved = provider.resolve(&session.token).await.expect("resolve");
        assert_eq!(resolved, Some(session.identity));
    }

    #[rstest]
    #[tokio::test]
    async fn user_ids_are_stable_per_email() {
        let provider = FixtureIdentityProvider;
        let first = provider
            .sign_up(&credentials("ada@example.com", "password"))
            .await
            .expect("sign up");
        let second = provider
            .sign_in(&credentials("ada@example.com", "password"))
            .await
            .expect("sign in");
        let other = provider
            .sign_in(&credentials("grace@example.com", "password"))
            .await
            .expect("sign in");

        assert_eq!(first.identity.id, second.identity.id);
        assert_ne!(first.identity.id, other.identity.id);
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let result = FixtureIdentityProvider
            .sign_in(&credentials("ada@example.com", "letmein"))
            .await;
        assert!(matches!(result, Err(IdentityProviderError::InvalidCredentials)));
    }

    #[rstest]
    #[case("garbage")]
    #[case("fixture.not-a-uuid:ada@example.com")]
    #[case("fixture.3fa85f64-5717-4562-b3fc-2c963f66afa6:ada@example.com")]
    #[tokio::test]
    async fn forged_tokens_resolve_to_none(#[case] raw: &str) {
        let resolved = FixtureIdentityProvider
            .resolve(&SessionToken::new(raw))
            .await
            .expect("resolve");
        assert!(resolved.is_none());
    }
}
