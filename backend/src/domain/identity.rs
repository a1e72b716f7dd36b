//! Identity primitives exchanged with the external identity provider.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{Email, EmailValidationError, UserId};

/// Minimum password length accepted before contacting the provider.
pub const PASSWORD_MIN: usize = 6;

/// Validation errors for [`Credentials`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error(transparent)]
    Email(#[from] EmailValidationError),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Email and password pair. The password is wiped from memory on drop.
#[derive(Clone)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate raw credential parts.
    ///
    /// # Examples
    /// ```
    /// use inkpress::domain::Credentials;
    ///
    /// let creds = Credentials::try_from_parts("ada@example.com", "hunter22").expect("valid");
    /// assert_eq!(creds.email().as_ref(), "ada@example.com");
    /// ```
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Opaque access token issued by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Authenticated caller as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
}

/// Result of a successful sign-up or sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub identity: Identity,
    pub token: SessionToken,
}
