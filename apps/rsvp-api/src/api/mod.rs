//! API routes module
//!
//! Everything is mounted at the root: `/events/...`, `/health` and `/ready`.

pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/events", events::router(state))
        .merge(health::router(state.clone()))
}
