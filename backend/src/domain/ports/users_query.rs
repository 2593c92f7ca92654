//! Driving port for user reads.
//!
//! Inbound adapters (HTTP handlers) call this port without knowing which
//! store sits behind it.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side user use-cases.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All stored users. An empty store is reported as
    /// [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound).
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user; absence is reported as `NotFound`.
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error>;
}
