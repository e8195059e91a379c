use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use database_layer::{Medication, MedicationRepository, NewMedication};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{parse_payload, store_failure, MessageResponse};
use crate::middleware::RecordId;
use crate::server::MedAssistServer;

const INVALID: &str = "Invalid medication data";
const NOT_FOUND: &str = "Medication not found";

/// Formulary, alphabetical
#[utoipa::path(
    get,
    path = "/api/medications",
    responses((status = 200, description = "Medications", body = Vec<Medication>)),
    tag = "medications"
)]
pub async fn list_medications(
    State(server): State<MedAssistServer>,
) -> ApiResult<Json<Vec<Medication>>> {
    let medications = server
        .store
        .list_medications()
        .await
        .map_err(|e| store_failure("Error fetching medications", e))?;
    Ok(Json(medications))
}

#[utoipa::path(
    get,
    path = "/api/medications/{id}",
    params(("id" = String, Path, description = "Medication id")),
    responses(
        (status = 200, description = "Medication", body = Medication),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "medications"
)]
pub async fn get_medication(
    State(server): State<MedAssistServer>,
    id: RecordId,
) -> ApiResult<Json<Medication>> {
    let id = id.or_not_found(NOT_FOUND)?;
    server
        .store
        .get_medication(id)
        .await
        .map_err(|e| store_failure("Error fetching medication", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

#[utoipa::path(
    post,
    path = "/api/medications",
    request_body = NewMedication,
    responses(
        (status = 201, description = "Medication added", body = Medication),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse)
    ),
    tag = "medications"
)]
pub async fn create_medication(
    State(server): State<MedAssistServer>,
    payload: Result<Json<NewMedication>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Medication>)> {
    let new = parse_payload(payload, INVALID)?;
    let medication = server
        .store
        .create_medication(&new)
        .await
        .map_err(|e| store_failure("Error creating medication", e))?;

    info!(medication_id = %medication.id, name = %medication.name, "Medication added");
    Ok((StatusCode::CREATED, Json(medication)))
}

#[utoipa::path(
    put,
    path = "/api/medications/{id}",
    params(("id" = String, Path, description = "Medication id")),
    request_body = NewMedication,
    responses(
        (status = 200, description = "Medication updated", body = Medication),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "medications"
)]
pub async fn update_medication(
    State(server): State<MedAssistServer>,
    id: RecordId,
    payload: Result<Json<NewMedication>, JsonRejection>,
) -> ApiResult<Json<Medication>> {
    let changes = parse_payload(payload, INVALID)?;
    let id = id.or_not_found(NOT_FOUND)?;
    let medication = server
        .store
        .update_medication(id, &changes)
        .await
        .map_err(|e| store_failure("Error updating medication", e))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(Json(medication))
}

#[utoipa::path(
    delete,
    path = "/api/medications/{id}",
    params(("id" = String, Path, description = "Medication id")),
    responses((status = 200, description = "Medication deleted", body = MessageResponse)),
    tag = "medications"
)]
pub async fn delete_medication(
    State(server): State<MedAssistServer>,
    RecordId(id): RecordId,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(id) = id {
        server
            .store
            .delete_medication(id)
            .await
            .map_err(|e| store_failure("Error deleting medication", e))?;
    }
    Ok(MessageResponse::new("Medication deleted"))
}
