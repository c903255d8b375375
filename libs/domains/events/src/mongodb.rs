//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use tracing::{info, instrument};

use crate::error::EventResult;
use crate::models::{Event, EventDocument, NewEvent, NewRsvp, RsvpDocument};
use crate::repository::EventRepository;

pub const COLLECTION_NAME: &str = "events";
pub const CREATED_AT_INDEX: &str = "createdAt_desc";

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// Ensure the descending `createdAt` index exists. Safe to call on every startup.
    pub async fn create_indexes(&self) -> EventResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name(CREATED_AT_INDEX.to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        info!(index = CREATED_AT_INDEX, "Event indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create(&self, input: NewEvent) -> EventResult<Event> {
        let document = EventDocument::new(input);
        self.collection.insert_one(&document).await?;

        info!(event_id = %document.id, "Event created");
        Ok(document.into())
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> EventResult<Option<Event>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn list_by_date(&self, limit: i64) -> EventResult<Vec<Event>> {
        // `_id` breaks ties between equal dates in insertion order
        let options = FindOptions::builder()
            .sort(doc! { "date": 1, "_id": 1 })
            .limit(limit)
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, rsvp), fields(event_id = %id, status = %rsvp.status))]
    async fn append_rsvp(&self, id: ObjectId, rsvp: NewRsvp) -> EventResult<Option<Event>> {
        let entry = to_bson(&RsvpDocument::new(rsvp))?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$push": { "rsvps": entry } })
            .with_options(options)
            .await?;

        Ok(updated.map(Into::into))
    }
}
