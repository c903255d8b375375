//! MongoDB document store
//!
//! [`connect`] is the only way to obtain a [`MongoStore`]; everything that
//! reads or writes events borrows its `Database`.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{MongoError, MongoStore, connect};
pub use health::{HealthStatus, check_health_detailed};
