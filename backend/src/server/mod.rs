//! HTTP server assembly: route table, middleware order and readiness.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::debug;

use users_api::Trace;
use users_api::inbound::http::health::{HealthState, live, ready};
use users_api::inbound::http::state::HttpState;
use users_api::inbound::http::users;

/// Swagger UI at `/docs`, serving the generated document; debug builds only.
#[cfg(debug_assertions)]
fn api_docs(cfg: &mut web::ServiceConfig) {
    use users_api::doc::ApiDoc;
    use utoipa::OpenApi as _;
    use utoipa_swagger_ui::SwaggerUi;

    cfg.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
}

#[cfg(not(debug_assertions))]
fn api_docs(_cfg: &mut web::ServiceConfig) {}

/// One worker's application: user routes behind [`Trace`], plus the probes.
fn users_app(
    health: web::Data<HealthState>,
    http: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health)
        .app_data(http)
        .wrap(Trace)
        .configure(users::configure)
        .service(ready)
        .service(live)
        .configure(api_docs)
}

/// Bind the listener and start serving users from the configured store.
///
/// Readiness is signalled once the socket is bound; the returned [`Server`]
/// must be awaited to drive it.
///
/// # Errors
/// Returns the bind failure when the address is unavailable.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        user_repository,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let http_state = web::Data::new(HttpState::from_repository(user_repository));
    #[cfg(feature = "metrics")]
    let metrics_layer = metrics::MetricsLayer::new(prometheus);

    let worker_health = health_state.clone();
    let server = HttpServer::new(move || {
        let app = users_app(worker_health.clone(), http_state.clone());
        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());
        app
    })
    .bind(bind_addr)?
    .run();

    debug!(%bind_addr, "listener bound");
    health_state.mark_ready();
    Ok(server)
}
