//! Public page rendering.
//!
//! ```text
//! GET /{domain}/{slug}
//! ```
//!
//! Path segments are normalised the same way as on creation, so
//! `/Blog.Example.com/About` resolves `blog.example.com` / `about`. Register
//! this route after every other route; it matches any two-segment path.

use actix_web::http::header::{CACHE_CONTROL, ContentType};
use actix_web::{HttpResponse, get, web};

use crate::domain::{DomainName, PageSlug};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::PUBLIC_PAGE_MAX_AGE;
use crate::inbound::http::render::{render_document, render_not_found};
use crate::inbound::http::state::HttpState;

fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(render_not_found())
}

/// Render a published page as HTML.
#[utoipa::path(
    get,
    path = "/{domain}/{slug}",
    params(
        ("domain" = String, Path, description = "Domain name"),
        ("slug" = String, Path, description = "Page slug")
    ),
    responses(
        (status = 200, description = "Rendered page", content_type = "text/html"),
        (status = 404, description = "No published page matches", content_type = "text/html")
    ),
    tags = ["public"],
    operation_id = "renderPage",
    security([])
)]
#[get("/{domain}/{slug}")]
pub async fn public_page(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (domain, slug) = path.into_inner();
    let (Ok(domain), Ok(slug)) = (DomainName::new(&domain), PageSlug::new(&slug)) else {
        return Ok(not_found());
    };
    let Some(page) = state.published.find_published(&domain, &slug).await? else {
        return Ok(not_found());
    };
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((CACHE_CONTROL, PUBLIC_PAGE_MAX_AGE))
        .body(render_document(&page)))
}
