//! User mirror handler.
//!
//! ```text
//! POST /api/user {"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6","email":"ada@example.com"}
//! ```
//!
//! Called by clients right after sign-up to make sure the local user row
//! exists. Idempotent: an existing row is returned unchanged.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Email, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, email_error, missing_field_error, parse_id};

const MISSING_USER_DATA: &str = "Missing user data";

/// Body for `POST /api/user`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

impl TryFrom<RegisterUserRequest> for User {
    type Error = crate::domain::Error;

    fn try_from(value: RegisterUserRequest) -> Result<Self, Self::Error> {
        let id_field = FieldName::new("id");
        let email_field = FieldName::new("email");
        let id = present(value.id).ok_or_else(|| missing_field_error(id_field, MISSING_USER_DATA))?;
        let email = present(value.email)
            .ok_or_else(|| missing_field_error(email_field, MISSING_USER_DATA))?;
        let id: UserId = parse_id(id.trim(), id_field)?;
        let email = Email::new(email).map_err(|err| email_error(email_field, err))?;
        Ok(User::new(id, email))
    }
}

/// Mirror an identity provider user into local storage.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "Stored user", body = User),
        (status = 400, description = "Missing or invalid user data", body = crate::domain::Error),
        (status = 503, description = "Storage unavailable", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/user")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<web::Json<User>> {
    let user = User::try_from(payload.into_inner())?;
    let stored = state.users.register(&user).await?;
    Ok(web::Json(stored))
}
