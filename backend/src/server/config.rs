//! Inputs to [`create_server`](super::create_server).

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use users_api::domain::ports::UserRepository;
use users_api::outbound::memory::InMemoryUserRepository;

/// Listener address, user store and optional metrics for one server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) user_repository: Arc<dyn UserRepository>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Serve on `bind_addr` from an empty in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            user_repository: Arc::new(InMemoryUserRepository::new()),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Replace the user store.
    #[must_use]
    pub fn with_user_repository(self, user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            user_repository,
            ..self
        }
    }

    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "read by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Record request metrics with `prometheus` when present.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(self, prometheus: Option<PrometheusMetrics>) -> Self {
        Self { prometheus, ..self }
    }
}
