//! Domain registration handlers.
//!
//! ```text
//! POST /api/domains      {"name":"blog.example.com"}
//! GET  /api/domains/list
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Domain, DomainName, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_identity;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, domain_name_error, require_text};

const NAME: FieldName = FieldName::new("name");

/// Body for `POST /api/domains`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomainRequest {
    /// Hostname; trimmed and lowercased before storage.
    #[schema(example = "blog.example.com")]
    pub name: Option<String>,
}

impl TryFrom<CreateDomainRequest> for DomainName {
    type Error = Error;

    fn try_from(value: CreateDomainRequest) -> Result<Self, Self::Error> {
        let raw = require_text(value.name, NAME, "Domain name is required")?;
        DomainName::new(raw).map_err(|err| domain_name_error(NAME, err))
    }
}

/// Register a domain for the caller.
#[utoipa::path(
    post,
    path = "/api/domains",
    request_body = CreateDomainRequest,
    responses(
        (status = 201, description = "Domain created", body = Domain),
        (status = 400, description = "Missing or invalid name", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Domain already exists", body = Error)
    ),
    tags = ["domains"],
    operation_id = "createDomain"
)]
#[post("/domains")]
pub async fn create_domain(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateDomainRequest>,
) -> ApiResult<HttpResponse> {
    let name = DomainName::try_from(payload.into_inner())?;
    let caller = require_identity(&session, state.sessions.as_ref()).await?;
    let domain = state.domains.create_domain(&caller, name).await?;
    Ok(HttpResponse::Created().json(domain))
}

/// Domains owned by the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/domains/list",
    responses(
        (status = 200, description = "Caller's domains", body = [Domain]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["domains"],
    operation_id = "listDomains"
)]
#[get("/domains/list")]
pub async fn list_domains(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let caller = require_identity(&session, state.sessions.as_ref()).await?;
    let domains = state.domains_query.list_domains(&caller).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(domains))
}
