//! Access-token storage in the session cookie.
//!
//! Only the identity service's opaque token is stored. Who it belongs to is
//! asked again on every request through
//! [`require_identity`](super::auth::require_identity).

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, SessionToken};

const ACCESS_TOKEN: &str = "access_token";

/// Extractor over the cookie session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Store `token` under a fresh session key.
    ///
    /// # Errors
    ///
    /// Internal error when the token cannot be serialised into the cookie.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACCESS_TOKEN, token.expose())
            .map_err(|err| Error::internal(format!("session write failed: {err}")))
    }

    /// Stored token; empty values count as absent.
    ///
    /// # Errors
    ///
    /// Internal error when the cookie holds an undecodable value.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        self.0
            .get::<String>(ACCESS_TOKEN)
            .map(|stored| stored.filter(|raw| !raw.is_empty()).map(SessionToken::new))
            .map_err(|err| Error::internal(format!("session read failed: {err}")))
    }

    /// Clear the session and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self(req.get_session())))
    }
}
