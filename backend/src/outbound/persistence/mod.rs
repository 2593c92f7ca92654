//! MongoDB persistence adapter for the user collection.
//!
//! # Architecture
//!
//! - **Thin adapter**: the repository only translates between BSON documents
//!   and domain types. No business logic resides here.
//! - **Internal documents**: `UserDocument` and the filter builders are
//!   private to this module and never reach the domain.
//! - **Fail fast**: connecting pings the deployment so an unreachable store
//!   stops startup.
//! - **Strongly typed errors**: driver failures are mapped to
//!   `UserPersistenceError`.
//!
//! # Example
//!
//! ```no_run
//! use users_api::outbound::persistence::{MongoUserRepository, StoreConfig};
//!
//! # async fn run() -> Result<(), users_api::outbound::persistence::StoreError> {
//! let config = StoreConfig::new("mongodb://127.0.0.1:27017", "osITI", "users");
//! let repo = MongoUserRepository::connect(&config).await?;
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod documents;
mod mongo_error_mapping;
mod mongo_user_repository;
mod store;

pub use mongo_user_repository::MongoUserRepository;
pub use store::{StoreConfig, StoreError};
