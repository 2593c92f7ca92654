//! HTTP inbound adapter: users CRUD routes, health probes and error mapping.

pub mod error;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;
