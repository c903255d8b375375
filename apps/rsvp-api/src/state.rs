//! Shared application state.

use database::mongodb::MongoStore;

/// Cloned into each router that needs it; the store shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub store: MongoStore,
}
