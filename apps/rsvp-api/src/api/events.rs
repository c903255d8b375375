//! Events API routes

use axum::Router;
use domain_events::{EventService, MongoEventRepository, handlers};
use tracing::info;

use crate::state::AppState;

/// Create the events router backed by the shared store
pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(state.store.database());
    let service = EventService::new(repository);

    handlers::router(service)
}

/// Ensure the `createdAt` index exists before the server accepts requests
pub async fn init_indexes(store: &database::mongodb::MongoStore) -> eyre::Result<()> {
    MongoEventRepository::new(store.database())
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!("Event collection indexes created");
    Ok(())
}
