use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, CreateRsvp, Event, Rsvp, RsvpStatus};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event, add_rsvp),
    components(
        schemas(Event, Rsvp, RsvpStatus, CreateEvent, CreateRsvp),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Events and their RSVPs")
    )
)]
pub struct ApiDoc;

/// Event id taken from the path.
///
/// Rejects before the body is read, so a malformed id wins over any body error.
pub struct EventIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for EventIdPath
where
    S: Send + Sync,
{
    type Rejection = EventError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ObjectIdPath(id) = ObjectIdPath::from_request_parts(parts, state)
            .await
            .map_err(|_| EventError::InvalidId)?;
        Ok(EventIdPath(id))
    }
}

/// Create the events router; mount it at `/events`
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events::<R>).post(create_event::<R>))
        .route("/{id}", get(get_event::<R>))
        .route("/{id}/rsvp", post(add_rsvp::<R>))
        .with_state(shared_service)
}

/// List the earliest events by date (at most 10)
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    responses(
        (status = 200, description = "Events sorted by date ascending", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list_events().await?;
    Ok(Json(events))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    EventIdPath(id): EventIdPath,
) -> EventResult<Json<Event>> {
    let event = service.get_event(id).await?;
    Ok(Json(event))
}

/// Append an RSVP to an event
#[utoipa::path(
    post,
    path = "/{id}/rsvp",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24 hex characters)")
    ),
    request_body = CreateRsvp,
    responses(
        (status = 200, description = "Updated event including the new RSVP", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_rsvp<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    EventIdPath(id): EventIdPath,
    ValidatedJson(input): ValidatedJson<CreateRsvp>,
) -> EventResult<Json<Event>> {
    let event = service.add_rsvp(id, input).await?;
    Ok(Json(event))
}
