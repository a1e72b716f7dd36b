//! Route tables for the HTTP adapter.
//!
//! The server mounts [`configure_api`] under `/api` inside the session
//! middleware; [`public_page`](super::public::public_page) is mounted last at
//! the root because it matches any two-segment path.

use actix_web::web;

use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::{domains, pages, sessions, users};

/// Register every `/api` handler on `cfg`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(sessions::sign_up)
        .service(sessions::login)
        .service(sessions::logout)
        .service(sessions::current_session)
        .service(users::register_user)
        .service(domains::create_domain)
        .service(domains::list_domains)
        .service(pages::create_page)
        .service(pages::list_pages)
        .service(pages::toggle_page);
}

/// JSON extractor settings: malformed bodies become a 400 domain error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(json_error_handler)
}
