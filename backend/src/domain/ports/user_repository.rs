//! Port abstraction for the user document store and its errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// The store was reached but the operation failed.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Narrow document-store contract consumed by the users service.
///
/// Identifiers an adapter cannot interpret resolve to `Ok(None)` rather than
/// an error: no record can carry them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, oldest first.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Persist a new user; the returned record carries the assigned identifier.
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Merge `patch` into the stored record and return it as persisted.
    async fn update_by_id(
        &self,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user, returning the record as it was before removal.
    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
