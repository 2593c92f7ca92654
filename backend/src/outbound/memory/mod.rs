//! In-memory user repository.
//!
//! Records live in an insertion-ordered vector behind a mutex; identifiers
//! are UUID v4 strings. Nothing survives a restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, UserPatch};

/// Process-local [`UserRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store lock poisoned"))
    }

    fn next_id() -> Result<UserId, UserPersistenceError> {
        UserId::new(Uuid::new_v4().to_string())
            .map_err(|err| UserPersistenceError::query(format!("generated invalid id: {err}")))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.iter().find(|user| user.id() == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let stored = user.into_user(Self::next_id()?);
        self.lock()?.push(stored.clone());
        Ok(stored)
    }

    async fn update_by_id(
        &self,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self.lock()?;
        Ok(users.iter_mut().find(|user| user.id() == id).map(|user| {
            user.apply(patch);
            user.clone()
        }))
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self.lock()?;
        let position = users.iter().position(|user| user.id() == id);
        Ok(position.map(|index| users.remove(index)))
    }
}
