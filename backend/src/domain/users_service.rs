//! User CRUD service implementing the driving ports.
//!
//! The service owns every decision the HTTP surface exposes: an empty store or
//! a missing identifier becomes `NotFound`, and any repository failure is
//! logged here and replaced with an opaque `InternalError`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Message returned when listing an empty store.
pub const NO_USERS_FOUND: &str = "No users found";
/// Message returned when an identifier matches no user.
pub const NO_USER_FOUND: &str = "No user found";

/// Users service backed by a [`UserRepository`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use users_api::domain::UsersService;
/// use users_api::outbound::memory::InMemoryUserRepository;
///
/// let service = UsersService::new(Arc::new(InMemoryUserRepository::new()));
/// let _clone = service.clone();
/// ```
pub struct UsersService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UsersService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UsersService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn store_failure(operation: &'static str, err: UserPersistenceError) -> Error {
    error!(operation, error = %err, "user repository failure");
    Error::internal(format!("{operation} failed: {err}"))
}

fn found_or_missing(operation: &'static str, user: Option<User>) -> Result<User, Error> {
    user.ok_or_else(|| {
        debug!(operation, "user not found");
        Error::not_found(NO_USER_FOUND)
    })
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self
            .repository
            .find_all()
            .await
            .map_err(|err| store_failure("list users", err))?;
        if users.is_empty() {
            return Err(Error::not_found(NO_USERS_FOUND));
        }
        Ok(users)
    }

    async fn fetch_user(&self, id: &UserId) -> Result<User, Error> {
        let user = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| store_failure("get user", err))?;
        found_or_missing("get user", user)
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        self.repository
            .insert(user)
            .await
            .map_err(|err| store_failure("create user", err))
    }

    async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, Error> {
        let user = self
            .repository
            .update_by_id(id, patch)
            .await
            .map_err(|err| store_failure("update user", err))?;
        found_or_missing("update user", user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<User, Error> {
        let user = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(|err| store_failure("delete user", err))?;
        found_or_missing("delete user", user)
    }
}
