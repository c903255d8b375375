use axum::http::{HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Builds the CORS layer for the browser client.
///
/// With configured origins only those are allowed, for the methods and
/// headers the API uses. Without any, every origin is allowed and a warning
/// is logged.
///
/// # Errors
/// Returns `InvalidInput` if a configured origin is not a valid header value.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    if !config.is_restricted() {
        warn!("No FRONTEND_URL configured, allowing cross-origin requests from any origin");
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid FRONTEND_URL value: {}", e),
            )
        })?;

    info!(
        "CORS configured with allowed origins: {}",
        config.allowed_origins.join(",")
    );

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}
