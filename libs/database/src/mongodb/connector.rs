use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::config::{DEFAULT_DATABASE, MongoConfig};

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// A live connection to one MongoDB database.
///
/// Only obtainable through [`connect`], so holding one means the server
/// answered a ping. Cloning is cheap and shares the driver's connection pool.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// The database handle repositories operate on
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// The driver client, for shutting the pool down
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Name of the resolved database
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

/// Connect using a MongoConfig and verify the server is reachable.
///
/// The database is resolved in order: `config.database`, the default
/// database in the connection string, then [`DEFAULT_DATABASE`]. No retries
/// are attempted; callers treat an error here as fatal.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect};
///
/// let config = MongoConfig::new("mongodb://localhost:27017/rsvp");
/// let store = connect(&config).await?;
/// ```
pub async fn connect(config: &MongoConfig) -> Result<MongoStore, MongoError> {
    info!("Attempting to connect to MongoDB at {}", config.redacted_url());

    let mut options = ClientOptions::parse(config.url()).await?;

    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let database_name = config
        .database()
        .map(str::to_string)
        .or_else(|| options.default_database.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

    let client = Client::with_options(options)?;
    let database = client.database(&database_name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!(database = %database_name, "Successfully connected to MongoDB");
    Ok(MongoStore { client, database })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::TestMongo;

    #[tokio::test]
    async fn test_connect_resolves_database_from_uri() {
        let mongo = TestMongo::new().await;
        let config = MongoConfig::new(format!("{}/from_uri", mongo.connection_string()));

        let store = connect(&config).await.unwrap();
        assert_eq!(store.database_name(), "from_uri");
    }

    #[tokio::test]
    async fn test_connect_prefers_explicit_database() {
        let mongo = TestMongo::new().await;
        let config = MongoConfig::with_database(
            format!("{}/from_uri", mongo.connection_string()),
            "explicit",
        );

        let store = connect(&config).await.unwrap();
        assert_eq!(store.database_name(), "explicit");
    }

    #[tokio::test]
    async fn test_connect_falls_back_to_default_database() {
        let mongo = TestMongo::new().await;
        let config = MongoConfig::new(mongo.connection_string());

        let store = connect(&config).await.unwrap();
        assert_eq!(store.database_name(), DEFAULT_DATABASE);
    }

    #[tokio::test]
    async fn test_connect_unreachable_server_fails() {
        let mut config = MongoConfig::new("mongodb://127.0.0.1:1/rsvp");
        config.server_selection_timeout_secs = 1;
        config.connect_timeout_secs = 1;

        let result = connect(&config).await;
        assert!(matches!(result, Err(MongoError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let config = MongoConfig::new("not-a-mongo-uri");
        let result = connect(&config).await;
        assert!(matches!(result, Err(MongoError::Mongo(_))));
    }
}
