//! Users API library modules.
//!
//! A hexagonal layout: [`domain`] holds the user model and use-cases,
//! [`inbound`] adapts HTTP requests onto them and [`outbound`] provides the
//! document stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
