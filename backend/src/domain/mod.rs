//! Domain primitives, ports and services.
//!
//! Purpose: hold the user model and the CRUD decision logic independently of
//! HTTP and of the document store. Inbound adapters call the driving ports;
//! outbound adapters implement the driven port.
//!
//! Public surface:
//! - `User`, `UserId`, `Age`, `NewUser`, `UserPatch`: the user resource.
//! - `Error`, `ErrorCode`: transport-agnostic failures.
//! - `TraceId`: request correlation identifier.
//! - `UsersService`: implementation of `UsersQuery` and `UsersCommand`.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Age, NewUser, User, UserId, UserPatch, UserValidationError};
pub use self::users_service::{NO_USER_FOUND, NO_USERS_FOUND, UsersService};
