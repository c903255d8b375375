//! HTTP client for the RSVP API

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub const CREATE_EVENT_FAILED: &str = "Failed to create event";
pub const SAVE_RSVP_FAILED: &str = "Failed to save RSVP";
pub const LOAD_EVENT_FAILED: &str = "Failed to load event";
pub const INVALID_EVENT_ID: &str = "Invalid event ID";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with an error; holds its `error` message
    #[error("{0}")]
    Api(String),

    /// The id is not a 24-character hex string, so no request was sent
    #[error("{INVALID_EVENT_ID}")]
    InvalidId,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Yes,
    No,
    Maybe,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpView {
    pub name: String,
    pub status: RsvpStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// An event as the API returns it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub rsvps: Vec<RsvpView>,
    pub created_at: Option<DateTime<Utc>>,
}

/// The calls the form makes against the API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn create_event(&self, title: &str, date: &str) -> ClientResult<EventView>;

    async fn get_event(&self, id: &str) -> ClientResult<EventView>;

    async fn add_rsvp(&self, id: &str, name: &str, status: RsvpStatus) -> ClientResult<EventView>;
}

/// [`EventsApi`] over HTTP with `reqwest`
#[derive(Clone)]
pub struct HttpEventsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEventsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/events/{id}` followed by `suffix`.
    ///
    /// Event ids are 24 hex characters; anything else is rejected before it
    /// can end up in the URL path.
    fn event_path(id: &str, suffix: &str) -> ClientResult<String> {
        if id.len() != 24 || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ClientError::InvalidId);
        }
        Ok(format!("/events/{id}{suffix}"))
    }

    /// Turn a response into an event, or into the API's error message.
    ///
    /// A body carrying `error` is a failure even with a 2xx status. A failing
    /// response without a usable message falls back to `fallback`.
    async fn read_event(response: reqwest::Response, fallback: &str) -> ClientResult<EventView> {
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<Value>(&bytes);

        let api_error = body
            .as_ref()
            .ok()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty());

        if let Some(message) = api_error {
            warn!(status = %status, error = %message, "API returned an error");
            return Err(ClientError::Api(message.to_string()));
        }

        if !status.is_success() {
            warn!(status = %status, "API request failed without an error message");
            return Err(ClientError::Api(fallback.to_string()));
        }

        Ok(serde_json::from_value(body?)?)
    }
}

#[async_trait]
impl EventsApi for HttpEventsApi {
    #[instrument(skip(self))]
    async fn create_event(&self, title: &str, date: &str) -> ClientResult<EventView> {
        let response = self
            .client
            .post(self.url("/events"))
            .json(&json!({ "title": title, "date": date }))
            .send()
            .await?;

        let event = Self::read_event(response, CREATE_EVENT_FAILED).await?;
        debug!(event_id = %event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_event(&self, id: &str) -> ClientResult<EventView> {
        let response = self
            .client
            .get(self.url(&Self::event_path(id, "")?))
            .send()
            .await?;

        Self::read_event(response, LOAD_EVENT_FAILED).await
    }

    #[instrument(skip(self))]
    async fn add_rsvp(&self, id: &str, name: &str, status: RsvpStatus) -> ClientResult<EventView> {
        let response = self
            .client
            .post(self.url(&Self::event_path(id, "/rsvp")?))
            .json(&json!({ "name": name, "status": status }))
            .send()
            .await?;

        Self::read_event(response, SAVE_RSVP_FAILED).await
    }
}
