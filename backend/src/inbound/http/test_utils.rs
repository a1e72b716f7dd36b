//! Fixtures shared by the HTTP handler tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::ports::FixtureIdentityProvider;
use crate::domain::{AuthService, DomainService, PageService, UserRegistryService};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::public::public_page;
use crate::inbound::http::routes::{configure_api, json_config};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::memory::MemoryStore;

/// Cookie sessions with a throwaway key, usable over plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over one shared in-memory store and the fixture provider.
pub fn memory_state() -> (HttpState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let domains = Arc::new(DomainService::new(store.clone(), store.clone()));
    let pages = Arc::new(PageService::new(store.clone(), store.clone()));
    let state = HttpState {
        sessions: Arc::new(AuthService::new(
            Arc::new(FixtureIdentityProvider),
            store.clone(),
        )),
        users: Arc::new(UserRegistryService::new(store.clone())),
        domains: domains.clone(),
        domains_query: domains,
        pages: pages.clone(),
        pages_query: pages.clone(),
        published: pages,
    };
    (state, store)
}

/// Application wired like the server, minus metrics and Swagger UI.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(state))
        .app_data(health)
        .app_data(json_config())
        .wrap(Trace)
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
                .configure(configure_api),
        )
        .service(ready)
        .service(live)
        .service(public_page)
}

/// Extract the `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("session cookie")
        .into_owned()
}

/// Sign in `email` through the fixture provider and return the cookie.
pub async fn login_cookie<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": email, "password": "password"}))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    session_cookie(&response)
}

/// Register `name` for the session in `cookie` and return the domain id.
pub async fn create_domain<S, B>(app: &S, cookie: &Cookie<'static>, name: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/domains")
            .cookie(cookie.clone())
            .set_json(json!({"name": name}))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "domain creation failed");
    let body: Value = test::read_body_json(response).await;
    body["id"].as_str().expect("domain id").to_owned()
}
