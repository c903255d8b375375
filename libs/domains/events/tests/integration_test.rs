//! Integration tests for the Events domain against a real MongoDB.
//!
//! Each test starts its own container through `TestMongo` and uses a
//! database named after the test.

use domain_events::{
    CREATED_AT_INDEX, CreateRsvp, EventError, EventRepository, EventService, LIST_LIMIT,
    MongoEventRepository, NewEvent, NewRsvp, RsvpStatus,
};
use mongodb::bson::{Document, oid::ObjectId};
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestMongo, assertions};

async fn setup(test_name: &str) -> (TestMongo, MongoEventRepository, TestDataBuilder) {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name(test_name);
    let repo = MongoEventRepository::new(&mongo.database(&builder.database_name()));
    repo.create_indexes().await.unwrap();
    (mongo, repo, builder)
}

fn new_event(builder: &TestDataBuilder, suffix: &str, offset_days: u32) -> NewEvent {
    NewEvent {
        title: builder.name("event", suffix),
        date: builder.date(offset_days),
    }
}

#[tokio::test]
async fn test_create_and_fetch_event() {
    let (_mongo, repo, builder) = setup("create_and_fetch").await;

    let created = repo.create(new_event(&builder, "offsite", 5)).await.unwrap();
    assert_eq!(created.id.len(), 24);
    assert!(created.rsvps.is_empty());

    let id = ObjectId::parse_str(&created.id).unwrap();
    let fetched = assertions::assert_some(repo.get_by_id(id).await.unwrap(), "created event");

    assert_eq!(fetched.title, builder.name("event", "offsite"));
    assert_eq!(fetched.date, builder.date(5));
    assert_eq!(
        fetched.created_at.timestamp_millis(),
        created.created_at.timestamp_millis()
    );
}

#[tokio::test]
async fn test_get_unknown_id_is_none() {
    let (_mongo, repo, _builder) = setup("get_unknown").await;

    assert!(repo.get_by_id(ObjectId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_returns_ten_earliest_by_date() {
    let (_mongo, repo, builder) = setup("list_ten_earliest").await;

    // Insert out of date order so the sort is what orders the result
    for offset in [7u32, 2, 11, 0, 9, 4, 1, 10, 3, 8, 6, 5] {
        repo.create(new_event(&builder, &offset.to_string(), offset))
            .await
            .unwrap();
    }

    let service = EventService::new(repo);
    let events = service.list_events().await.unwrap();

    assert_eq!(events.len(), 10);
    assertions::assert_sorted_by(&events, |e| e.date.clone(), "listed events");

    let dates: Vec<String> = events.iter().map(|e| e.date.clone()).collect();
    let expected: Vec<String> = (0..10).map(|i| builder.date(i)).collect();
    assert_eq!(dates, expected);
}

#[tokio::test]
async fn test_list_ties_keep_insertion_order() {
    let (_mongo, repo, builder) = setup("list_ties").await;

    let first = repo.create(new_event(&builder, "first", 3)).await.unwrap();
    let second = repo.create(new_event(&builder, "second", 3)).await.unwrap();

    let events = repo.list_by_date(LIST_LIMIT).await.unwrap();
    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
}

#[tokio::test]
async fn test_append_rsvp_returns_post_image() {
    let (_mongo, repo, builder) = setup("append_post_image").await;
    let event = repo.create(new_event(&builder, "party", 1)).await.unwrap();
    let id = ObjectId::parse_str(&event.id).unwrap();

    let after_first = repo
        .append_rsvp(
            id,
            NewRsvp {
                name: "Ann".to_string(),
                status: RsvpStatus::Yes,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_first.rsvps.len(), 1);
    assert_eq!(after_first.rsvps[0].name, "Ann");
    assert_eq!(after_first.rsvps[0].status, RsvpStatus::Yes);

    let after_second = repo
        .append_rsvp(
            id,
            NewRsvp {
                name: "Bob".to_string(),
                status: RsvpStatus::Maybe,
            },
        )
        .await
        .unwrap()
        .unwrap();
    let names: Vec<&str> = after_second.rsvps.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Bob"]);
}

#[tokio::test]
async fn test_append_rsvp_unknown_event_is_none() {
    let (_mongo, repo, _builder) = setup("append_unknown").await;

    let result = repo
        .append_rsvp(
            ObjectId::new(),
            NewRsvp {
                name: "Ann".to_string(),
                status: RsvpStatus::No,
            },
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_concurrent_appends_are_not_lost() {
    const APPENDS: usize = 25;

    let (_mongo, repo, builder) = setup("concurrent_appends").await;
    let event = repo.create(new_event(&builder, "busy", 0)).await.unwrap();
    let id = ObjectId::parse_str(&event.id).unwrap();
    let repo = Arc::new(repo);

    let handles: Vec<_> = (0..APPENDS)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.append_rsvp(
                    id,
                    NewRsvp {
                        name: format!("guest-{i}"),
                        status: RsvpStatus::Yes,
                    },
                )
                .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    let stored = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.rsvps.len(), APPENDS);
}

#[tokio::test]
async fn test_invalid_status_leaves_rsvps_unchanged() {
    let (_mongo, repo, builder) = setup("invalid_status").await;
    let event = repo.create(new_event(&builder, "picnic", 2)).await.unwrap();
    let id = ObjectId::parse_str(&event.id).unwrap();
    let service = EventService::new(repo);

    service
        .add_rsvp(
            id,
            CreateRsvp {
                name: Some("Ann".to_string()),
                status: Some("yes".to_string()),
            },
        )
        .await
        .unwrap();

    let err = service
        .add_rsvp(
            id,
            CreateRsvp {
                name: Some("Bob".to_string()),
                status: Some("wrong".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EventError::InvalidStatus(_)));

    let stored = service.get_event(id).await.unwrap();
    assert_eq!(stored.rsvps.len(), 1);
    assert_eq!(stored.rsvps[0].name, "Ann");
}

#[tokio::test]
async fn test_create_indexes_is_idempotent() {
    let (mongo, repo, builder) = setup("indexes_idempotent").await;

    repo.create_indexes().await.unwrap();

    let names = mongo
        .database(&builder.database_name())
        .collection::<Document>("events")
        .list_index_names()
        .await
        .unwrap();
    assert!(names.iter().any(|n| n == CREATED_AT_INDEX));
}
