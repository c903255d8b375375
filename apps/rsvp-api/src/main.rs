use axum_helpers::server::create_production_app;
use core_config::{
    Environment, load_dotenv,
    tracing::{init_tracing, install_color_eyre},
};
use std::time::Duration;
use tracing::{error, info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    // Before anything reads the environment, APP_ENV included
    let dotenv = load_dotenv();

    // Tracing first so configuration failures are logged before exit
    init_tracing(&Environment::from_env());

    match dotenv {
        Ok(true) => info!("Loaded environment from .env"),
        Ok(false) => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    let config = Config::from_env()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    info!(
        app = config.app.name,
        version = config.app.version,
        "Starting RSVP API"
    );

    let store = database::mongodb::connect(&config.mongodb)
        .await
        .inspect_err(|e| error!("Failed to connect to MongoDB: {}", e))?;

    api::events::init_indexes(&store)
        .await
        .inspect_err(|e| error!("{}", e))?;

    info!(
        database = store.database_name(),
        "MongoDB connected and index ensured"
    );

    let state = AppState { config, store };

    let api_routes = api::routes(&state);
    let app = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?;

    info!("Starting RSVP API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            state.store.client().clone().shutdown().await;
            info!("MongoDB connections closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("RSVP API shutdown complete");
    Ok(())
}
