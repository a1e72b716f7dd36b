//! Inkpress entry point: loads settings, wires adapters, and serves HTTP.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::WrapErr;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use inkpress::inbound::http::health::HealthState;
use inkpress::inbound::http::session_config::{BuildMode, session_settings_from_env};
use inkpress::outbound::identity::GoTrueIdentityProvider;
use inkpress::outbound::persistence::{DbPool, run_pending_migrations};
use inkpress::settings::AppSettings;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(session, bind_addr);

    if let Some(pool_config) = settings.pool_config()? {
        if settings.migrate_on_start {
            let applied = run_pending_migrations(pool_config.database_url())
                .await
                .wrap_err("failed to apply migrations")?;
            info!(applied, "migrations checked");
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    if let Some(identity) = settings.identity(mode)? {
        let provider = GoTrueIdentityProvider::new(&identity.base_url, identity.api_key)
            .wrap_err("failed to build identity client")?;
        info!(base_url = %identity.base_url, "using identity service");
        config = config.with_identity(provider);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(make_metrics());
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}

fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("inkpress")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "prometheus metrics disabled");
            None
        }
    }
}
