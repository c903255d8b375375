//! Events Domain
//!
//! Events with an append-only list of embedded RSVPs, stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request schemas validated here
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Domain values, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Documents, API types, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_events::{EventService, MongoEventRepository, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("rsvp");
//!
//! let repository = MongoEventRepository::new(&db);
//! repository.create_indexes().await?;
//!
//! let events = handlers::router(EventService::new(repository));
//! let app: Router = Router::new().nest("/events", events);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateEvent, CreateRsvp, Event, EventDocument, NewEvent, NewRsvp, Rsvp, RsvpDocument,
    RsvpStatus,
};
pub use crate::mongodb::{CREATED_AT_INDEX, MongoEventRepository};
pub use repository::EventRepository;
pub use service::{EventService, LIST_LIMIT};
