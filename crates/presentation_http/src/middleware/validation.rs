//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using the validator crate.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// A JSON extractor that also validates the request body
///
/// Malformed JSON becomes `bad_request`; failed rules become
/// `validation_error` naming the first offending field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value.validate().map_err(|e| validation_error(&e))?;

        Ok(Self(value))
    }
}

fn validation_error(errors: &ValidationErrors) -> ApiError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "Invalid {field}: {}",
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string)
                )
            })
        })
        .collect();

    ApiError::Validation {
        field: fields.first().map(|(field, _)| field.to_string()),
        message: messages.join("; "),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;
    use crate::error::ErrorResponse;

    #[derive(Debug, Deserialize, Validate)]
    struct TestRequest {
        #[validate(email(message = "must be a valid email address"))]
        address: String,
        #[validate(length(min = 1, message = "must not be empty"))]
        note: String,
    }

    async fn test_handler(ValidatedJson(req): ValidatedJson<TestRequest>) -> String {
        req.address
    }

    fn app() -> Router {
        Router::new().route("/test", post(test_handler))
    }

    async fn call(body: &'static str) -> (StatusCode, Option<ErrorResponse>) {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/test")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn valid_request_passes() {
        let (status, _) = call(r#"{"address": "a@example.com", "note": "hi"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_field_is_named() {
        let (status, body) = call(r#"{"address": "nope", "note": "hi"}"#).await;
        let body = body.unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "validation_error");
        assert_eq!(body.field.as_deref(), Some("address"));
        assert!(body.error.contains("valid email"));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, body) = call(r#"{"address": "#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.unwrap().code, "bad_request");
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (status, body) = call(r#"{"note": "hi"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.unwrap().code, "bad_request");
    }
}
