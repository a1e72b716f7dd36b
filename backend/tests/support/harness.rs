//! Spawned-server harness shared by HTTP integration suites.
//!
//! The server runs on a single-threaded Tokio runtime plus a `LocalSet`
//! because Actix uses `spawn_local` internally. [`WorldFixture`] stops the
//! server on drop, so a panicking test still releases its port.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use inkpress::Trace;
use inkpress::domain::TRACE_ID_HEADER;
use inkpress::domain::ports::FixtureIdentityProvider;
use inkpress::domain::{AuthService, DomainService, PageService, UserRegistryService};
use inkpress::inbound::http::health::{HealthState, live, ready};
use inkpress::inbound::http::public::public_page;
use inkpress::inbound::http::routes::{configure_api, json_config};
use inkpress::inbound::http::session_config::SessionSettings;
use inkpress::inbound::http::state::HttpState;
use inkpress::outbound::memory::MemoryStore;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// Outcome of the most recent request.
#[derive(Debug, Default, Clone)]
pub(crate) struct Recorded {
    pub(crate) status: u16,
    pub(crate) trace_id: Option<String>,
    pub(crate) content_type: Option<String>,
    pub(crate) cache_control: Option<String>,
    pub(crate) set_cookie: Option<String>,
    pub(crate) body: Vec<u8>,
}

impl Recorded {
    pub(crate) fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    pub(crate) fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("UTF-8 body")
    }
}

/// A request to send through [`send`].
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) cookie: Option<String>,
    pub(crate) payload: Option<Value>,
}

impl<'a> RequestSpec<'a> {
    pub(crate) fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            cookie: None,
            payload: None,
        }
    }

    pub(crate) fn post(path: &'a str, payload: Value) -> Self {
        Self {
            method: Method::POST,
            path,
            cookie: None,
            payload: Some(payload),
        }
    }

    pub(crate) fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }
}

pub(crate) struct ServerWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) store: Arc<MemoryStore>,
    /// Session cookie pairs (`session=...`) keyed by user label.
    pub(crate) cookies: HashMap<String, String>,
    /// Identifiers captured from earlier responses, keyed by label.
    pub(crate) ids: HashMap<String, String>,
    pub(crate) last: Option<Recorded>,
}

impl ServerWorld {
    pub(crate) fn last(&self) -> &Recorded {
        self.last.as_ref().expect("a request has been sent")
    }

    pub(crate) fn cookie(&self, user: &str) -> Option<String> {
        self.cookies.get(user).cloned()
    }
}

pub(crate) type SharedWorld = Rc<RefCell<ServerWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        // `LocalSet` must be driven on its owning thread; the future must not
        // borrow the world again.
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

fn memory_state(store: &Arc<MemoryStore>) -> HttpState {
    let domains = Arc::new(DomainService::new(store.clone(), store.clone()));
    let pages = Arc::new(PageService::new(store.clone(), store.clone()));
    HttpState {
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
    }
}

fn spawn_server(store: &Arc<MemoryStore>) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    let http_state = web::Data::new(memory_state(store));
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_state.clone())
            .app_data(health.clone())
            .app_data(json_config())
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .wrap(session.middleware())
                    .configure(configure_api),
            )
            .service(ready)
            .service(live)
            .service(public_page)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let store = Arc::new(MemoryStore::new());
    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server(&store) })
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(ServerWorld {
            runtime,
            local,
            base_url,
            server,
            store,
            cookies: HashMap::new(),
            ids: HashMap::new(),
            last: None,
        })),
    }
}

fn header_value(response: &awc::ClientResponse<impl Sized>, name: impl header::AsHeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Send `request` and record the outcome as the world's last response.
pub(crate) fn send(world: &SharedWorld, request: RequestSpec<'_>) -> Recorded {
    let RequestSpec {
        method,
        path,
        cookie,
        payload,
    } = request;
    let recorded = {
        let ctx = world.borrow();
        let url = format!("{}{path}", ctx.base_url);
        ctx.local.block_on(&ctx.runtime, async move {
            let mut request = Client::default().request(method, url);
            if let Some(cookie) = cookie {
                request = request.insert_header((header::COOKIE, cookie));
            }
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await,
                None => request.send().await,
            }
            .expect("request should complete");
            let body = response.body().await.expect("response body");
            Recorded {
                status: response.status().as_u16(),
                trace_id: header_value(&response, TRACE_ID_HEADER),
                content_type: header_value(&response, header::CONTENT_TYPE),
                cache_control: header_value(&response, header::CACHE_CONTROL),
                set_cookie: header_value(&response, header::SET_COOKIE),
                body: body.to_vec(),
            }
        })
    };
    world.borrow_mut().last = Some(recorded.clone());
    recorded
}

/// `name=value` pair of a `Set-Cookie` header.
pub(crate) fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .trim()
        .to_owned()
}
