//! API state and error envelope
//!
//! Contains:
//! - `AppState`, the shared handles every handler extracts
//! - `ApiError`, the `{ "error": { "code", "message" } }` response body
//! - The mapping from service errors to HTTP status codes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::DynDatabasePool;
use crate::services::{StudyActivityService, StudyActivityServiceError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub study_activity_service: Arc<StudyActivityService>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<StudyActivityServiceError> for ApiError {
    fn from(err: StudyActivityServiceError) -> Self {
        match err {
            StudyActivityServiceError::NotFound(msg) => ApiError::not_found(msg),
            StudyActivityServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            StudyActivityServiceError::InternalError(e) => {
                // Storage details stay in the log
                tracing::error!("Internal error: {:#}", e);
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_not_found() {
        let error = ApiError::not_found("Study activity with ID 3 not found");
        assert_eq!(error.error.code, "NOT_FOUND");
        assert_eq!(error.error.message, "Study activity with ID 3 not found");
    }

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (ApiError::not_found("x"), StatusCode::NOT_FOUND),
            (ApiError::validation_error("x"), StatusCode::BAD_REQUEST),
            (ApiError::internal_error("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::new("SOMETHING_ELSE", "x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::validation_error("group with ID 9 does not exist");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "error": {
                    "code": "VALIDATION_ERROR",
                    "message": "group with ID 9 does not exist"
                }
            })
        );
    }

    #[test]
    fn test_service_error_mapping() {
        let not_found: ApiError = StudyActivityServiceError::NotFound("gone".into()).into();
        assert_eq!(not_found.error.code, "NOT_FOUND");
        assert_eq!(not_found.error.message, "gone");

        let invalid: ApiError = StudyActivityServiceError::ValidationError("bad".into()).into();
        assert_eq!(invalid.error.code, "VALIDATION_ERROR");
        assert_eq!(invalid.error.message, "bad");
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err = StudyActivityServiceError::InternalError(anyhow::anyhow!(
            "no such table: study_sessions"
        ));
        let api: ApiError = err.into();

        assert_eq!(api.error.code, "INTERNAL_ERROR");
        assert!(!api.error.message.contains("study_sessions"));
    }
}
