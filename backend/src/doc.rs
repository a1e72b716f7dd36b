//! OpenAPI document for the HTTP surface.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for client generation.

use crate::domain::{
    Domain, DomainSummary, Error, ErrorCode, Identity, Page, PageListing, User,
};
use crate::inbound::http::domains::CreateDomainRequest;
use crate::inbound::http::pages::{CreatePageRequest, TogglePageRequest};
use crate::inbound::http::sessions::CredentialsRequest;
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::users::RegisterUserRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Encrypted session cookie issued by POST /api/auth/login or /api/auth/signup.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Inkpress API",
        description = "Multi-tenant markdown publishing: domains, pages, and public rendering."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sessions::sign_up,
        crate::inbound::http::sessions::login,
        crate::inbound::http::sessions::logout,
        crate::inbound::http::sessions::current_session,
        crate::inbound::http::users::register_user,
        crate::inbound::http::domains::create_domain,
        crate::inbound::http::domains::list_domains,
        crate::inbound::http::pages::create_page,
        crate::inbound::http::pages::list_pages,
        crate::inbound::http::pages::toggle_page,
        crate::inbound::http::public::public_page,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Identity,
        User,
        Domain,
        DomainSummary,
        Page,
        PageListing,
        CredentialsRequest,
        RegisterUserRequest,
        CreateDomainRequest,
        CreatePageRequest,
        TogglePageRequest,
    )),
    tags(
        (name = "auth", description = "Sign-up, login, and session lookup"),
        (name = "users", description = "Local user mirror"),
        (name = "domains", description = "Domains owned by the caller"),
        (name = "pages", description = "Pages under the caller's domains"),
        (name = "public", description = "Rendered published pages"),
        (name = "health", description = "Orchestration health checks")
    )
)]
pub struct ApiDoc;
