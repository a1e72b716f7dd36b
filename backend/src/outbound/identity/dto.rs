//! Wire shapes for the GoTrue REST API.
//!
//! Only the fields this service reads are modelled; everything else in the
//! provider's responses is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::ports::IdentityProviderError;
use crate::domain::{Email, Identity, UserId};

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserBody {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserBody {
    pub fn into_identity(self) -> Result<Identity, IdentityProviderError> {
        let id = UserId::new(&self.id)
            .map_err(|err| IdentityProviderError::protocol(format!("user id: {err}")))?;
        let email = Email::new(self.email.unwrap_or_default())
            .map_err(|err| IdentityProviderError::protocol(format!("user email: {err}")))?;
        Ok(Identity { id, email })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SessionBody {
    pub access_token: String,
    pub user: UserBody,
}

/// Sign-up answers with a session, or with the bare user when the provider
/// requires email confirmation first.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SignUpBody {
    Session(SessionBody),
    User(UserBody),
}

/// GoTrue has used several error envelopes across versions.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}
