use mongodb::bson::doc;
use std::time::Instant;

use super::MongoStore;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is healthy
    pub healthy: bool,
    /// Optional message (e.g., error details)
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Ping the store's database, reporting latency and any error message.
pub async fn check_health_detailed(store: &MongoStore) -> HealthStatus {
    let start = Instant::now();
    let result = store.database().run_command(doc! { "ping": 1 }).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mongodb::{MongoConfig, connect};
    use test_utils::TestMongo;

    #[tokio::test]
    async fn test_check_health_detailed() {
        let mongo = TestMongo::new().await;
        let store = connect(&MongoConfig::new(mongo.connection_string()))
            .await
            .unwrap();

        let status = check_health_detailed(&store).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }
}
