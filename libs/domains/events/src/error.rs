//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

pub const INVALID_ID_MESSAGE: &str = "Invalid event ID";
pub const NOT_FOUND_MESSAGE: &str = "Event not found";
pub const INVALID_STATUS_MESSAGE: &str = "Invalid RSVP status";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(ObjectId),

    #[error("Invalid event ID")]
    InvalidId,

    /// Missing or empty required input; carries the client-facing message
    #[error("{0}")]
    Validation(String),

    #[error("Invalid RSVP status: {0}")]
    InvalidStatus(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON error: {0}")]
    Bson(String),
}

pub type EventResult<T> = Result<T, EventError>;

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(_) => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            EventError::InvalidId => AppError::InvalidObjectId(INVALID_ID_MESSAGE.to_string()),
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::InvalidStatus(_) => {
                AppError::BadRequest(INVALID_STATUS_MESSAGE.to_string())
            }
            EventError::Database(e) => AppError::InternalServerError(e.to_string()),
            EventError::Bson(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        EventError::Bson(format!("BSON serialization error: {}", err))
    }
}

impl From<mongodb::bson::de::Error> for EventError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        EventError::Bson(format!("BSON deserialization error: {}", err))
    }
}
