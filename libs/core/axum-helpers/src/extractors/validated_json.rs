//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserializes the body, then runs the `validator` crate's `Validate` impl.
/// Both a malformed body and a failed validation become a 400 with the
/// standard error body; the validation case reports the first field message.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateEvent {
///     #[validate(required(message = "Title is required"))]
///     title: Option<String>,
/// }
///
/// async fn create_event(ValidatedJson(payload): ValidatedJson<CreateEvent>) -> String {
///     format!("Creating event: {:?}", payload.title)
/// }
///
/// let app = Router::new().route("/events", post(create_event));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Guest {
        #[validate(
            required(message = "Name is required"),
            length(min = 1, message = "Name is required")
        )]
        name: Option<String>,
    }

    async fn greet(ValidatedJson(guest): ValidatedJson<Guest>) -> String {
        guest.name.unwrap_or_default()
    }

    async fn send(body: &str, content_type: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method("POST").uri("/guests");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let response = Router::new()
            .route("/guests", post(greet))
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, body) = send(r#"{"name":"Ann"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Ann");
    }

    #[tokio::test]
    async fn test_missing_and_empty_fields_fail_validation() {
        for payload in [r#"{}"#, r#"{"name":""}"#, r#"{"name":null}"#] {
            let (status, body) = send(payload, Some("application/json")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");

            let json: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["error"], "Name is required");
            assert_eq!(json["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = send("{not json", Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_bad_request_not_422() {
        let (status, _) = send(r#"{"name":5}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let (status, _) = send(r#"{"name":"Ann"}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
