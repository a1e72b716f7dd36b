//! Page authoring handlers.
//!
//! ```text
//! POST /api/pages        {"title":"About","slug":"about","content":"# Hi","domainId":"<uuid>"}
//! GET  /api/pages/list
//! POST /api/pages/toggle {"pageId":"<uuid>"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainId, Error, Page, PageDraft, PageId, PageListing, PageSlug, PageTitle};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_identity;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, page_field_error, parse_id, require_text};

const DOMAIN_ID: FieldName = FieldName::new("domainId");
const PAGE_ID: FieldName = FieldName::new("pageId");

/// Body for `POST /api/pages`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    #[schema(example = "About")]
    pub title: Option<String>,
    /// Trimmed and lowercased; must then match `[a-z0-9_-]+`.
    #[schema(example = "about")]
    pub slug: Option<String>,
    /// Markdown source. Defaults to empty.
    #[schema(example = "# About us")]
    pub content: Option<String>,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub domain_id: Option<String>,
}

impl TryFrom<CreatePageRequest> for PageDraft {
    type Error = Error;

    fn try_from(value: CreatePageRequest) -> Result<Self, Self::Error> {
        let title = require_text(value.title, FieldName::new("title"), "Title is required")?;
        let slug = require_text(value.slug, FieldName::new("slug"), "Slug is required")?;
        let domain_id = require_text(value.domain_id, DOMAIN_ID, "Domain is required")?;
        let slug = PageSlug::new(slug).map_err(page_field_error)?;
        let title = PageTitle::new(title).map_err(page_field_error)?;
        let domain_id: DomainId = parse_id(domain_id.trim(), DOMAIN_ID)?;
        Ok(PageDraft {
            title,
            slug,
            content: value.content.unwrap_or_default(),
            domain_id,
        })
    }
}

/// Body for `POST /api/pages/toggle`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TogglePageRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub page_id: Option<String>,
}

/// Create an unpublished page under one of the caller's domains.
#[utoipa::path(
    post,
    path = "/api/pages",
    request_body = CreatePageRequest,
    responses(
        (status = 201, description = "Page created", body = Page),
        (status = 400, description = "Missing or invalid fields", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Domain not owned by caller", body = Error),
        (status = 404, description = "Domain no longer exists", body = Error),
        (status = 409, description = "Slug already used in this domain", body = Error)
    ),
    tags = ["pages"],
    operation_id = "createPage"
)]
#[post("/pages")]
pub async fn create_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePageRequest>,
) -> ApiResult<HttpResponse> {
    let draft = PageDraft::try_from(payload.into_inner())?;
    let caller = require_identity(&session, state.sessions.as_ref()).await?;
    let page = state.pages.create_page(&caller, draft).await?;
    Ok(HttpResponse::Created().json(page))
}

/// Pages across the caller's domains, newest first, each with its domain.
#[utoipa::path(
    get,
    path = "/api/pages/list",
    responses(
        (status = 200, description = "Caller's pages", body = [PageListing]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["pages"],
    operation_id = "listPages"
)]
#[get("/pages/list")]
pub async fn list_pages(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let caller = require_identity(&session, state.sessions.as_ref()).await?;
    let pages = state.pages_query.list_pages(&caller).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(pages))
}

/// Flip the published flag of one of the caller's pages.
#[utoipa::path(
    post,
    path = "/api/pages/toggle",
    request_body = TogglePageRequest,
    responses(
        (status = 200, description = "Page with its flag inverted", body = Page),
        (status = 400, description = "Missing or malformed pageId", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such page owned by caller", body = Error)
    ),
    tags = ["pages"],
    operation_id = "togglePage"
)]
#[post("/pages/toggle")]
pub async fn toggle_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TogglePageRequest>,
) -> ApiResult<web::Json<Page>> {
    let raw = require_text(payload.into_inner().page_id, PAGE_ID, "pageId required")?;
    let page_id: PageId = parse_id(raw.trim(), PAGE_ID)?;
    let caller = require_identity(&session, state.sessions.as_ref()).await?;
    let page = state.pages.toggle_published(&caller, &page_id).await?;
    Ok(web::Json(page))
}
