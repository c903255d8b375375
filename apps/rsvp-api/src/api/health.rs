//! Health check endpoints
//!
//! `/health` is pure liveness and never touches the store. `/ready` pings it.

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, health_router, run_health_checks};
use database::mongodb::check_health_detailed;
use tracing::debug;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
        .merge(health_router())
}

async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.clone();
    let mongodb: HealthCheckFuture = Box::pin(async move {
        let status = check_health_detailed(&store).await;
        debug!(
            response_time_ms = status.response_time_ms,
            "MongoDB readiness ping"
        );
        if status.healthy {
            Ok(())
        } else {
            Err(status
                .message
                .unwrap_or_else(|| "ping failed".to_string()))
        }
    });

    match run_health_checks(vec![("mongodb", mongodb)]).await {
        Ok(ready) => ready,
        Err(not_ready) => not_ready,
    }
}
