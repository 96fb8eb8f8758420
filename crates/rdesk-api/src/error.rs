//! # API Error Types
//!
//! Error type implementing `axum::response::IntoResponse`. Every error
//! response is a flat JSON object with a single `error` string. Server-side
//! causes are logged but never echoed to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rdesk_core::SubmissionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::repository::RepositoryError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// Application-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The dataset could not be read (500).
    #[error("review request data unavailable: {0}")]
    DataUnavailable(String),

    /// The body was not JSON, or was JSON `null` (500).
    #[error("invalid request body: {0}")]
    InvalidPayload(String),

    /// A required field was absent or empty (400).
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field had the wrong type or an unaccepted value (400).
    #[error("invalid field: {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl AppError {
    /// HTTP status and the message placed in the response body.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::DataUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load review requests".to_string(),
            ),
            Self::InvalidPayload(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid request".to_string(),
            ),
            Self::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Bad Request: Missing field: {field}"),
            ),
            Self::InvalidField { field, .. } => (
                StatusCode::BAD_REQUEST,
                format!("Bad Request: Invalid field: {field}"),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::InvalidPayload(reason) => Self::InvalidPayload(reason),
            SubmissionError::MissingField(field) => Self::MissingField(field),
            SubmissionError::InvalidField { field, reason } => Self::InvalidField { field, reason },
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Malformed(reason) => Self::DataUnavailable(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn data_unavailable_hides_cause() {
        let (status, body) =
            response_parts(AppError::DataUnavailable("record 3: missing field `id`".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Failed to load review requests" }));
    }

    #[tokio::test]
    async fn invalid_payload_is_generic_500() {
        let (status, body) = response_parts(AppError::InvalidPayload("EOF".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Invalid request");
    }

    #[tokio::test]
    async fn missing_field_names_field() {
        let (status, body) = response_parts(AppError::MissingField("documentType")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request: Missing field: documentType");
    }

    #[tokio::test]
    async fn invalid_field_omits_reason() {
        let (status, body) = response_parts(AppError::InvalidField {
            field: "priority",
            reason: "unknown priority: Urgent".into(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request: Invalid field: priority");
    }

    #[test]
    fn submission_errors_convert() {
        assert!(matches!(
            AppError::from(SubmissionError::MissingField("dueDate")),
            AppError::MissingField("dueDate")
        ));
        assert!(matches!(
            AppError::from(SubmissionError::InvalidPayload("x".into())),
            AppError::InvalidPayload(_)
        ));
    }

    #[test]
    fn repository_errors_convert() {
        assert!(matches!(
            AppError::from(RepositoryError::Malformed("x".into())),
            AppError::DataUnavailable(_)
        ));
    }
}
