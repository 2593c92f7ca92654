//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Write-side user use-cases.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return it with its assigned identifier.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Apply a partial update; absence is reported as `NotFound`.
    async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, Error>;

    /// Remove a user and return its last state; absence is reported as
    /// `NotFound`.
    async fn delete_user(&self, id: &UserId) -> Result<User, Error>;
}
