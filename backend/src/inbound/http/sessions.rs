//! Account and session handlers.
//!
//! ```text
//! POST /api/auth/signup  {"email":"ada@example.com","password":"hunter22"}
//! POST /api/auth/login   {"email":"ada@example.com","password":"hunter22"}
//! POST /api/auth/logout
//! GET  /api/auth/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::{Credentials, Error, Identity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_identity;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, credentials_error, missing_field_error, require_text,
};

/// Body for sign-up and login.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "hunter22")]
    pub password: Option<String>,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = Error;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        let email = require_text(value.email, FieldName::new("email"), "Email is required")?;
        let password = Zeroizing::new(
            value
                .password
                .filter(|password| !password.is_empty())
                .ok_or_else(|| {
                    missing_field_error(FieldName::new("password"), "Password is required")
                })?,
        );
        Credentials::try_from_parts(&email, &password).map_err(credentials_error)
    }
}

/// Create an account, mirror its user record, and sign in.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = Identity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid or rejected credentials", body = Error),
        (status = 503, description = "Identity service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let auth = state.sessions.sign_up(&credentials).await?;
    session.persist_token(&auth.token)?;
    Ok(HttpResponse::Created().json(auth.identity))
}

/// Exchange credentials for a session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = Identity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Identity service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let auth = state.sessions.sign_in(&credentials).await?;
    session.persist_token(&auth.token)?;
    Ok(HttpResponse::Ok().json(auth.identity))
}

/// Revoke the session and clear the cookie. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    match session.token() {
        Ok(Some(token)) => state.sessions.sign_out(&token).await,
        Ok(None) => {}
        Err(error) => tracing::warn!(%error, "unreadable session on logout"),
    }
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Identity behind the current session.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Signed-in identity", body = Identity),
        (status = 401, description = "No valid session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/auth/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Identity>> {
    let identity = require_identity(&session, state.sessions.as_ref()).await?;
    Ok(web::Json(identity))
}
