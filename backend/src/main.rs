//! Users API entry-point: loads settings, connects the user store and serves
//! the REST endpoints.

mod server;

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig as _;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_api::domain::ports::UserRepository;
use users_api::inbound::http::health::HealthState;
use users_api::outbound::memory::InMemoryUserRepository;
use users_api::outbound::persistence::MongoUserRepository;
use users_api::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings_from(std::env::args_os())?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let repository = build_user_repository(&settings).await?;

    let config = ServerConfig::new(bind_addr).with_user_repository(repository);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("users_api")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}

/// Layer defaults, environment and command-line arguments into settings.
fn load_settings_from<I>(args: I) -> io::Result<AppSettings>
where
    I: IntoIterator<Item = OsString>,
{
    AppSettings::load_from_iter(args)
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))
}

/// Resolve the configured user store. An unreachable MongoDB deployment is
/// fatal.
async fn build_user_repository(settings: &AppSettings) -> io::Result<Arc<dyn UserRepository>> {
    if settings.in_memory {
        warn!("serving users from process memory; records are lost on restart");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    }

    let store = settings.store_config();
    match MongoUserRepository::connect(&store).await {
        Ok(repository) => {
            info!(
                database = store.database(),
                collection = store.collection(),
                "store connected"
            );
            Ok(Arc::new(repository))
        }
        Err(err) => {
            error!(error = %err, "failed to connect to the user store");
            Err(io::Error::other(err))
        }
    }
}

#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(make_metrics: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make_metrics() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without");
            None
        }
    }
}

#[cfg(test)]
mod tests;
