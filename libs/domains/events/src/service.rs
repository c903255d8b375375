use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, CreateRsvp, Event, NewEvent, NewRsvp};
use crate::repository::EventRepository;

/// Maximum number of events returned by [`EventService::list_events`]
pub const LIST_LIMIT: i64 = 10;

/// Service layer for Event business logic
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create an event from request input
    #[instrument(skip(self, input))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        let new_event = NewEvent::try_from(input)?;
        self.repository.create(new_event).await
    }

    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn get_event(&self, id: ObjectId) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// The earliest events by date, at most [`LIST_LIMIT`]
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> EventResult<Vec<Event>> {
        self.repository.list_by_date(LIST_LIMIT).await
    }

    /// Validate an RSVP and append it to the event.
    ///
    /// Input errors are reported before the store is touched, so a rejected
    /// RSVP never reaches the event.
    #[instrument(skip(self, input), fields(event_id = %id))]
    pub async fn add_rsvp(&self, id: ObjectId, input: CreateRsvp) -> EventResult<Event> {
        let rsvp = NewRsvp::try_from(input)?;

        self.repository
            .append_rsvp(id, rsvp)
            .await?
            .ok_or(EventError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rsvp, RsvpStatus};
    use crate::repository::MockEventRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_event(id: ObjectId, rsvps: Vec<Rsvp>) -> Event {
        Event {
            id: id.to_hex(),
            title: "Team Offsite".to_string(),
            date: "2025-06-01".to_string(),
            rsvps,
            created_at: Utc::now(),
        }
    }

    fn rsvp_input(name: &str, status: &str) -> CreateRsvp {
        CreateRsvp {
            name: Some(name.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_event_passes_validated_input() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_create()
            .with(eq(NewEvent {
                title: "Team Offsite".to_string(),
                date: "2025-06-01".to_string(),
            }))
            .times(1)
            .returning(|_| Ok(sample_event(ObjectId::new(), vec![])));

        let service = EventService::new(mock_repo);
        let event = service
            .create_event(CreateEvent {
                title: Some("Team Offsite".to_string()),
                date: Some("2025-06-01".to_string()),
            })
            .await
            .unwrap();

        assert!(event.rsvps.is_empty());
    }

    #[tokio::test]
    async fn test_create_event_missing_field_never_reaches_store() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().never();

        let service = EventService::new(mock_repo);
        let err = service
            .create_event(CreateEvent {
                title: Some("Team Offsite".to_string()),
                date: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let id = ObjectId::new();
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let err = service.get_event(id).await.unwrap_err();

        assert!(matches!(err, EventError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_list_events_uses_limit() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_list_by_date()
            .with(eq(LIST_LIMIT))
            .returning(|_| Ok(vec![]));

        let service = EventService::new(mock_repo);
        assert!(service.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_rsvp_returns_updated_event() {
        let id = ObjectId::new();
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_append_rsvp()
            .with(
                eq(id),
                eq(NewRsvp {
                    name: "Ann".to_string(),
                    status: RsvpStatus::Yes,
                }),
            )
            .times(1)
            .returning(|id, rsvp| {
                Ok(Some(sample_event(
                    id,
                    vec![Rsvp {
                        name: rsvp.name,
                        status: rsvp.status,
                        created_at: Utc::now(),
                    }],
                )))
            });

        let service = EventService::new(mock_repo);
        let event = service.add_rsvp(id, rsvp_input("Ann", "yes")).await.unwrap();

        assert_eq!(event.rsvps.len(), 1);
        assert_eq!(event.rsvps[0].name, "Ann");
    }

    #[tokio::test]
    async fn test_add_rsvp_invalid_status_never_reaches_store() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_append_rsvp().never();

        let service = EventService::new(mock_repo);
        let err = service
            .add_rsvp(ObjectId::new(), rsvp_input("Ann", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::InvalidStatus(_)));
    }

    #[tokio::test]
    async fn test_add_rsvp_missing_event() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_append_rsvp().returning(|_, _| Ok(None));

        let service = EventService::new(mock_repo);
        let err = service
            .add_rsvp(ObjectId::new(), rsvp_input("Ann", "no"))
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::NotFound(_)));
    }
}
