//! Server harness and shared world for users API behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{App, HttpServer, web};
use awc::Client;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use users_api::Trace;
use users_api::domain::TRACE_ID_HEADER;
use users_api::inbound::http::health::{HealthState, live, ready};
use users_api::inbound::http::state::HttpState;
use users_api::inbound::http::users;
use users_api::outbound::memory::InMemoryUserRepository;

pub(crate) struct UsersWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<String>,
    pub(crate) last_content_type: Option<String>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) created_id: Option<String>,
}

impl UsersWorld {
    /// Parse the last response body as JSON.
    pub(crate) fn last_json(&self) -> Value {
        let body = self.last_body.as_deref().expect("response body");
        serde_json::from_str(body).expect("json body")
    }
}

pub(crate) type SharedWorld = Rc<RefCell<UsersWorld>>;

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
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

async fn spawn_users_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(HttpState::from_repository(Arc::new(
        InMemoryUserRepository::new(),
    )));
    let health_data = web::Data::new(HealthState::new());
    health_data.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(health_data.clone())
            .wrap(Trace)
            .configure(users::configure)
            .service(ready)
            .service(live)
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

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

/// Start a server over an empty in-memory store.
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let (base_url, server) = local
        .block_on(&runtime, spawn_users_server())
        .expect("start users server");

    WorldFixture {
        world: Rc::new(RefCell::new(UsersWorld {
            runtime,
            local,
            base_url,
            server,
            last_status: None,
            last_body: None,
            last_content_type: None,
            last_trace_id: None,
            created_id: None,
        })),
    }
}

/// Request sent by a step.
pub(crate) enum Payload<'a> {
    None,
    Json(Value),
    Raw(&'a str),
}

fn header_text(value: Option<&HeaderValue>) -> Option<String> {
    value
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Send a request and record status, headers and body in the world.
pub(crate) fn perform_request(world: &SharedWorld, method: Method, path: &str, payload: Payload<'_>) {
    let path = path.to_owned();
    let (status, content_type, trace_id, body) = with_world_async(world, |base_url| async move {
        let request = Client::default().request(method, format!("{base_url}{path}"));
        let mut response = match payload {
            Payload::None => request.send().await.expect("request"),
            Payload::Json(value) => request.send_json(&value).await.expect("json request"),
            Payload::Raw(raw) => request
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .send_body(raw.to_owned())
                .await
                .expect("raw request"),
        };
        let status = response.status().as_u16();
        let content_type = header_text(response.headers().get(header::CONTENT_TYPE));
        let trace_id = header_text(response.headers().get(TRACE_ID_HEADER));
        let body = response.body().await.expect("body");
        let body = String::from_utf8(body.to_vec()).expect("utf8 body");
        (status, content_type, trace_id, body)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_content_type = content_type;
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}
