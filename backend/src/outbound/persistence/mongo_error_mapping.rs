//! Driver error classification for the user repository.

use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

/// Whether the driver failed to reach the deployment at all.
fn is_connection_failure(kind: &ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
    )
}

/// Map a driver error into the repository port error.
pub(crate) fn map_mongo_error(operation: &'static str, error: MongoError) -> UserPersistenceError {
    debug!(operation, error = %error, "mongodb operation failed");

    if is_connection_failure(error.kind.as_ref()) {
        UserPersistenceError::connection(error.to_string())
    } else {
        UserPersistenceError::query(error.to_string())
    }
}
