//! MongoDB client construction.
//!
//! [`StoreConfig`] names the deployment, database and collection;
//! [`connect_collection`] resolves it into a typed collection handle after
//! proving the deployment answers a `ping`, so an unreachable store is
//! reported at startup instead of on the first request.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

/// Errors raised while establishing the store connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or resolved.
    #[error("invalid MongoDB connection options: {message}")]
    Options { message: String },

    /// The deployment did not answer within the selection timeout.
    #[error("failed to connect to MongoDB: {message}")]
    Connect { message: String },
}

impl StoreError {
    /// Create an options error with the given message.
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options {
            message: message.into(),
        }
    }

    /// Create a connect error with the given message.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }
}

/// Location of the user collection.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use users_api::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://127.0.0.1:27017", "osITI", "users")
///     .with_server_selection_timeout(Duration::from_secs(2));
/// assert_eq!(config.database(), "osITI");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
    collection: String,
    server_selection_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration with a 5 second server-selection timeout.
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
            server_selection_timeout: Duration::from_secs(5),
        }
    }

    /// Bound how long the driver waits for a reachable server.
    #[must_use]
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

/// Open a client, ping the deployment and return the configured collection.
///
/// # Errors
///
/// Returns [`StoreError::Options`] for an unusable connection string and
/// [`StoreError::Connect`] when the deployment cannot be reached.
pub async fn connect_collection<T>(config: &StoreConfig) -> Result<Collection<T>, StoreError>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    let mut options = ClientOptions::parse(config.uri())
        .await
        .map_err(|err| StoreError::options(err.to_string()))?;
    options.server_selection_timeout = Some(config.server_selection_timeout);
    options.app_name = Some(env!("CARGO_PKG_NAME").to_owned());

    let client = Client::with_options(options).map_err(|err| StoreError::options(err.to_string()))?;
    let database = client.database(config.database());
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|err| StoreError::connect(err.to_string()))?;

    info!(
        database = config.database(),
        collection = config.collection(),
        "connected to MongoDB"
    );
    Ok(database.collection::<T>(config.collection()))
}
