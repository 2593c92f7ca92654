//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed user repository
//! - **memory**: process-local user repository for development and tests
//!
//! Adapters are thin translators between domain types and store-specific
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
