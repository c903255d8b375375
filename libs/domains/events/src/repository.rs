use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::EventResult;
use crate::models::{Event, NewEvent, NewRsvp};

/// Repository trait for Event persistence
///
/// Every method is a single round-trip to the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event with no RSVPs and return it with its assigned id
    async fn create(&self, input: NewEvent) -> EventResult<Event>;

    /// Get an event by ID
    async fn get_by_id(&self, id: ObjectId) -> EventResult<Option<Event>>;

    /// The `limit` events with the earliest `date`, ascending
    async fn list_by_date(&self, limit: i64) -> EventResult<Vec<Event>>;

    /// Atomically append an RSVP and return the event as it is after the append.
    ///
    /// `None` when no event has this id.
    async fn append_rsvp(&self, id: ObjectId, rsvp: NewRsvp) -> EventResult<Option<Event>>;
}
