//! Router assembly, liveness/readiness helpers and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let routes = api_routes.merge(health_router());
//! let router = create_router::<ApiDoc>(routes, &cors)?;
//!
//! create_production_app(router, &server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router, normalize_paths};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
