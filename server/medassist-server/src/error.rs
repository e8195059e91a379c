use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// Error type
    pub error_type: String,
    /// Stable error code
    pub code: String,
    /// Unique error ID, also present in the server log line
    pub error_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum
///
/// Messages are fixed per route and never carry the underlying cause; the
/// cause is logged where the error is produced.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation { message: String, code: &'static str },

    #[error("Resource not found: {message}")]
    NotFound { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String, code: &'static str },
}

impl ApiError {
    /// Create a simple validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::INVALID_INPUT,
        }
    }

    /// Validation error caused by a reference to a missing row
    pub fn unknown_reference(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::UNKNOWN_REFERENCE,
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            code: codes::database::QUERY_FAILED,
        }
    }

    /// Internal error raised by the clinical assistant
    pub fn assistant(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            code: codes::assistant::GENERATION_FAILED,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { code, .. } | ApiError::Internal { code, .. } => code,
            ApiError::NotFound { .. } => codes::resource::NOT_FOUND,
        }
    }

    /// Client-facing message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. }
            | ApiError::NotFound { message }
            | ApiError::Internal { message, .. } => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID
        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                code = self.code(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                code = self.code(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API request rejected"
            );
        }

        let error_response = ApiErrorResponse {
            message: self.message().to_string(),
            error_type: self.error_type().to_string(),
            code: self.code().to_string(),
            error_id,
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
