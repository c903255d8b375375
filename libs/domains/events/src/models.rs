//! Event domain models
//!
//! Three layers of types:
//! - request schemas (`CreateEvent`, `CreateRsvp`) validated at the HTTP boundary
//! - domain values (`NewEvent`, `NewRsvp`) that only exist once input is valid
//! - stored documents (`EventDocument`) and their API form (`Event`)

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::EventError;

pub const EVENT_FIELDS_REQUIRED: &str = "Title and date are required";
pub const RSVP_FIELDS_REQUIRED: &str = "Name and status are required";

/// A guest's answer. Parsing is case-sensitive: only `yes`, `no`, `maybe`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RsvpStatus {
    Yes,
    No,
    Maybe,
}

/// One guest response, as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    #[schema(example = "Ann")]
    pub name: String,
    pub status: RsvpStatus,
    pub created_at: DateTime<Utc>,
}

/// Event as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier (24 hex characters)
    #[schema(example = "665f1c2e8b3f4a0012345678")]
    pub id: String,
    #[schema(example = "Team Offsite")]
    pub title: String,
    /// Free-form date text, stored as submitted
    #[schema(example = "2025-06-01")]
    pub date: String,
    /// Responses in the order they were received
    pub rsvps: Vec<Rsvp>,
    pub created_at: DateTime<Utc>,
}

/// Reads any JSON scalar as text: `null` is absent, a string is kept, and
/// anything else becomes its JSON rendering (`5` -> `"5"`).
///
/// A wrongly typed field then fails the same domain checks as a bad string
/// instead of rejecting the whole body.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// Request body for `POST /events`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(
        required(message = "Title and date are required"),
        length(min = 1, message = "Title and date are required")
    )]
    #[schema(example = "Team Offsite")]
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,

    #[validate(
        required(message = "Title and date are required"),
        length(min = 1, message = "Title and date are required")
    )]
    #[schema(example = "2025-06-01")]
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
}

/// Request body for `POST /events/{id}/rsvp`
///
/// `status` stays a string here so a value outside the enum, or one that is
/// not a string at all, is reported as an invalid status rather than a
/// malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRsvp {
    #[validate(
        required(message = "Name and status are required"),
        length(min = 1, message = "Name and status are required")
    )]
    #[schema(example = "Ann")]
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[validate(
        required(message = "Name and status are required"),
        length(min = 1, message = "Name and status are required")
    )]
    #[schema(example = "yes")]
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

/// A validated event ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
}

/// A validated RSVP ready to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRsvp {
    pub name: String,
    pub status: RsvpStatus,
}

impl TryFrom<CreateEvent> for NewEvent {
    type Error = EventError;

    fn try_from(input: CreateEvent) -> Result<Self, Self::Error> {
        match (input.title, input.date) {
            (Some(title), Some(date)) if !title.is_empty() && !date.is_empty() => {
                Ok(Self { title, date })
            }
            _ => Err(EventError::Validation(EVENT_FIELDS_REQUIRED.to_string())),
        }
    }
}

impl TryFrom<CreateRsvp> for NewRsvp {
    type Error = EventError;

    /// Required fields are checked before the status value.
    fn try_from(input: CreateRsvp) -> Result<Self, Self::Error> {
        let (name, status) = match (input.name, input.status) {
            (Some(name), Some(status)) if !name.is_empty() && !status.is_empty() => {
                (name, status)
            }
            _ => return Err(EventError::Validation(RSVP_FIELDS_REQUIRED.to_string())),
        };

        let status = status
            .parse::<RsvpStatus>()
            .map_err(|_| EventError::InvalidStatus(status))?;

        Ok(Self { name, status })
    }
}

/// Stored RSVP entry, embedded in [`EventDocument::rsvps`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpDocument {
    pub name: String,
    pub status: RsvpStatus,
    pub created_at: bson::DateTime,
}

/// Stored event document in the `events` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub rsvps: Vec<RsvpDocument>,
    pub created_at: bson::DateTime,
}

impl EventDocument {
    /// A fresh document with a new id, no RSVPs and the current time
    pub fn new(input: NewEvent) -> Self {
        Self {
            id: ObjectId::new(),
            title: input.title,
            date: input.date,
            rsvps: Vec::new(),
            created_at: bson::DateTime::now(),
        }
    }
}

impl RsvpDocument {
    pub fn new(input: NewRsvp) -> Self {
        Self {
            name: input.name,
            status: input.status,
            created_at: bson::DateTime::now(),
        }
    }
}

fn to_chrono(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

impl From<RsvpDocument> for Rsvp {
    fn from(doc: RsvpDocument) -> Self {
        Self {
            name: doc.name,
            status: doc.status,
            created_at: to_chrono(doc.created_at),
        }
    }
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            date: doc.date,
            rsvps: doc.rsvps.into_iter().map(Into::into).collect(),
            created_at: to_chrono(doc.created_at),
        }
    }
}
