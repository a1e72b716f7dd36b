//! HTTP server assembly for the binary.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

use inkpress::Trace;
use inkpress::inbound::http::health::{HealthState, live, ready};
use inkpress::inbound::http::public::public_page;
use inkpress::inbound::http::routes::{configure_api, json_config};
use inkpress::inbound::http::session_config::SessionSettings;
use inkpress::inbound::http::state::HttpState;

/// Everything a worker clones into its `App`.
#[derive(Clone)]
struct Shared {
    health: web::Data<HealthState>,
    state: web::Data<HttpState>,
    session: SessionSettings,
}

impl Shared {
    fn register(self, cfg: &mut web::ServiceConfig) {
        let Self {
            health,
            state,
            session,
        } = self;
        cfg.app_data(health)
            .app_data(state)
            .app_data(json_config())
            .service(
                web::scope("/api")
                    .wrap(session.middleware())
                    .configure(configure_api),
            )
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        {
            use inkpress::doc::ApiDoc;
            use utoipa::OpenApi;
            use utoipa_swagger_ui::SwaggerUi;

            cfg.service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        // Catch-all for two-segment paths.
        cfg.service(public_page);
    }
}

/// Bind `config.bind_addr` and return the running server. Readiness flips
/// once the socket is bound.
///
/// # Errors
///
/// Propagates the bind failure.
pub fn create_server(
    health: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let shared = Shared {
        health: health.clone(),
        state: web::Data::new(state_builders::build_http_state(&config)),
        session: config.session,
    };
    #[cfg(feature = "metrics")]
    let prometheus = metrics::OptionalMetrics::from(config.prometheus);

    let server = HttpServer::new(move || {
        let shared = shared.clone();
        let app = App::new()
            .wrap(Trace)
            .configure(move |cfg| shared.register(cfg));
        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());
        app
    })
    .bind(config.bind_addr)?
    .run();

    health.mark_ready();
    Ok(server)
}
