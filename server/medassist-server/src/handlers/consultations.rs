use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use database_layer::{Consultation, ConsultationRepository, NewConsultation};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{parse_payload, store_failure, write_failure, MessageResponse};
use crate::middleware::RecordId;
use crate::server::MedAssistServer;

const INVALID: &str = "Invalid consultation data";
const NOT_FOUND: &str = "Consultation not found";

/// List all consultations, most recently recorded first
#[utoipa::path(
    get,
    path = "/api/consultations",
    responses(
        (status = 200, description = "Consultations", body = Vec<Consultation>),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse)
    ),
    tag = "consultations"
)]
pub async fn list_consultations(
    State(server): State<MedAssistServer>,
) -> ApiResult<Json<Vec<Consultation>>> {
    let consultations = server
        .store
        .list_consultations()
        .await
        .map_err(|e| store_failure("Error fetching consultations", e))?;
    Ok(Json(consultations))
}

#[utoipa::path(
    get,
    path = "/api/consultations/{id}",
    params(("id" = String, Path, description = "Consultation id")),
    responses(
        (status = 200, description = "Consultation", body = Consultation),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "consultations"
)]
pub async fn get_consultation(
    State(server): State<MedAssistServer>,
    id: RecordId,
) -> ApiResult<Json<Consultation>> {
    let id = id.or_not_found(NOT_FOUND)?;
    server
        .store
        .get_consultation(id)
        .await
        .map_err(|e| store_failure("Error fetching consultation", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// `patientId` must name an existing patient
#[utoipa::path(
    post,
    path = "/api/consultations",
    request_body = NewConsultation,
    responses(
        (status = 201, description = "Consultation recorded", body = Consultation),
        (status = 400, description = "Invalid payload or unknown patient", body = crate::error::ApiErrorResponse)
    ),
    tag = "consultations"
)]
pub async fn create_consultation(
    State(server): State<MedAssistServer>,
    payload: Result<Json<NewConsultation>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Consultation>)> {
    let new = parse_payload(payload, INVALID)?;
    let consultation = server
        .store
        .create_consultation(&new)
        .await
        .map_err(|e| write_failure(INVALID, "Error creating consultation", e))?;

    info!(
        consultation_id = %consultation.id,
        patient_id = %consultation.patient_id,
        "Consultation recorded"
    );
    Ok((StatusCode::CREATED, Json(consultation)))
}

#[utoipa::path(
    put,
    path = "/api/consultations/{id}",
    params(("id" = String, Path, description = "Consultation id")),
    request_body = NewConsultation,
    responses(
        (status = 200, description = "Consultation updated", body = Consultation),
        (status = 400, description = "Invalid payload or unknown patient", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "consultations"
)]
pub async fn update_consultation(
    State(server): State<MedAssistServer>,
    id: RecordId,
    payload: Result<Json<NewConsultation>, JsonRejection>,
) -> ApiResult<Json<Consultation>> {
    let changes = parse_payload(payload, INVALID)?;
    let id = id.or_not_found(NOT_FOUND)?;
    let consultation = server
        .store
        .update_consultation(id, &changes)
        .await
        .map_err(|e| write_failure(INVALID, "Error updating consultation", e))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(consultation_id = %consultation.id, "Consultation updated");
    Ok(Json(consultation))
}

#[utoipa::path(
    delete,
    path = "/api/consultations/{id}",
    params(("id" = String, Path, description = "Consultation id")),
    responses((status = 200, description = "Consultation deleted", body = MessageResponse)),
    tag = "consultations"
)]
pub async fn delete_consultation(
    State(server): State<MedAssistServer>,
    RecordId(id): RecordId,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(id) = id {
        server
            .store
            .delete_consultation(id)
            .await
            .map_err(|e| store_failure("Error deleting consultation", e))?;
        info!(consultation_id = %id, "Consultation deleted");
    }
    Ok(MessageResponse::new("Consultation deleted"))
}
