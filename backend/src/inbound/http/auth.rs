//! Resolve the caller behind a session cookie.
//!
//! Handlers validate their input first and only then call
//! [`require_identity`], so malformed requests fail with 400 regardless of
//! session state.

use crate::domain::ports::SessionService;
use crate::domain::{Error, Identity};

use super::ApiResult;
use super::session::SessionContext;

/// Identity for the stored token, or `401 login required`.
///
/// A token the provider no longer recognises is purged from the cookie.
pub async fn require_identity(
    session: &SessionContext,
    sessions: &dyn SessionService,
) -> ApiResult<Identity> {
    let Some(token) = session.token()? else {
        return Err(Error::unauthorized("login required"));
    };
    match sessions.identify(&token).await? {
        Some(identity) => Ok(identity),
        None => {
            session.purge();
            Err(Error::unauthorized("login required"))
        }
    }
}
