//! ObjectId path parameter extractor with automatic validation.

use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

/// Extractor for a single MongoDB ObjectId path parameter.
///
/// Accepts only the 24-character hex form. Anything else is rejected with
/// [`AppError::InvalidObjectId`] before the request body is read.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_event(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("Event ID: {}", id.to_hex())
/// }
///
/// let app = Router::new().route("/events/{id}", get(get_event));
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        ObjectId::parse_str(&raw).map(ObjectIdPath).map_err(|_| {
            tracing::debug!(raw = %raw, "Rejected malformed ObjectId");
            AppError::InvalidObjectId(ErrorCode::InvalidObjectId.default_message().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn echo(ObjectIdPath(id): ObjectIdPath) -> String {
        id.to_hex()
    }

    fn app() -> Router {
        Router::new().route("/things/{id}", get(echo))
    }

    #[tokio::test]
    async fn test_valid_object_id() {
        let id = ObjectId::new();
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/things/{}", id.to_hex()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, id.to_hex().as_bytes());
    }

    #[tokio::test]
    async fn test_malformed_object_id_is_bad_request() {
        for raw in ["not-an-id", "123", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            let response = app()
                .oneshot(
                    Request::builder()
                        .uri(format!("/things/{}", raw))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id {raw}");
            let body = response.into_body().collect().await.unwrap().to_bytes();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["code"], "INVALID_OBJECT_ID");
        }
    }
}
