//! API error handling.
//!
//! Every failure is rendered as
//! `{"detail": ..., "error_code": ..., "field_errors"?: {field: [messages]}}`.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::task::{domain::TaskDomainError, services::TaskLifecycleError};

/// Field name mapped to the messages reported against it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
const TASK_NOT_FOUND: &str = "TASK_NOT_FOUND";
const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub detail: String,
    /// Machine-readable code.
    pub error_code: String,
    /// Per-field messages for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl ApiError {
    /// Creates an error without field details.
    #[must_use]
    pub fn new(detail: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            error_code: error_code.into(),
            field_errors: None,
        }
    }

    /// Creates a validation error with a single field message.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut field_errors = FieldErrors::new();
        field_errors.insert(field.into(), vec![message.into()]);
        Self::invalid_fields(field_errors)
    }

    /// Creates a validation error carrying messages for several fields.
    #[must_use]
    pub fn invalid_fields(field_errors: FieldErrors) -> Self {
        Self {
            detail: "Validation error".to_owned(),
            error_code: VALIDATION_ERROR.to_owned(),
            field_errors: Some(field_errors),
        }
    }
}

/// API error response containing status code and error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 response reporting `message` against `field`.
    #[must_use]
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::validation(field, message))
    }

    /// Creates a 400 response from collected per-field messages.
    #[must_use]
    pub fn invalid_fields(field_errors: FieldErrors) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::invalid_fields(field_errors))
    }

    /// Creates a 400 response for a create body without a title.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::validation_error(field, "Field required")
    }

    /// Creates a 404 response for an unknown task.
    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new(detail, TASK_NOT_FOUND))
    }

    /// Creates an opaque 500 response.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("Internal server error", INTERNAL_SERVER_ERROR),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TaskDomainError> for ApiErrorResponse {
    fn from(error: TaskDomainError) -> Self {
        Self::validation_error(error.field(), error.to_string())
    }
}

impl From<TaskLifecycleError> for ApiErrorResponse {
    fn from(error: TaskLifecycleError) -> Self {
        match error {
            TaskLifecycleError::Validation(domain) => Self::from(domain),
            missing @ TaskLifecycleError::NotFound(_) => Self::not_found(missing.to_string()),
            TaskLifecycleError::Storage(cause) => {
                tracing::error!(error = %cause, "task storage failure");
                Self::internal_error()
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::validation_error("body", rejection.body_text())
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected path parameter");
        Self::validation_error("task_id", rejection.body_text())
    }
}
