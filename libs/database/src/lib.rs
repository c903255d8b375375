//! Document store plumbing for the RSVP service.
//!
//! Owns how the process talks to MongoDB: configuration, the one-shot
//! connect that produces a [`mongodb::MongoStore`] handle, and health probes.
//! Repositories receive a `Database` from that handle; nothing here is global.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect};
//!
//! let config = MongoConfig::new("mongodb://localhost:27017/rsvp");
//! let store = connect(&config).await?;
//! let events = store.database().collection::<Document>("events");
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
