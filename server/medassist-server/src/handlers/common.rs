//! Helpers shared by the resource handlers
use axum::{extract::rejection::JsonRejection, Json};
use database_layer::DatabaseError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::validation::RequestValidation;

/// Body returned by delete endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Unwrap and validate a JSON body, answering `message` on any failure
pub fn parse_payload<T: RequestValidation>(
    payload: Result<Json<T>, JsonRejection>,
    message: &'static str,
) -> Result<T, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        ApiError::validation(message)
    })?;

    body.validate().map_err(|reason| {
        tracing::debug!(reason = %reason, "Request body failed validation");
        ApiError::validation(message)
    })?;

    Ok(body)
}

/// Log a store failure and hide it behind `message`
pub fn store_failure(message: &'static str, error: DatabaseError) -> ApiError {
    tracing::error!(error = %error, "{}", message);
    ApiError::internal(message)
}

/// Like [`store_failure`], but a dangling `patientId` is the client's fault
pub fn write_failure(
    invalid_message: &'static str,
    failure_message: &'static str,
    error: DatabaseError,
) -> ApiError {
    if error.is_foreign_key_violation() {
        tracing::debug!(error = %error, "Write references a missing patient");
        return ApiError::unknown_reference(invalid_message);
    }
    store_failure(failure_message, error)
}
