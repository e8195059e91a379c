use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use database_layer::{
    Appointment, AppointmentRepository, Consultation, ConsultationRepository, NewPatient, Patient,
    PatientRepository,
};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{parse_payload, store_failure, MessageResponse};
use crate::middleware::RecordId;
use crate::server::MedAssistServer;

const INVALID: &str = "Invalid patient data";
const NOT_FOUND: &str = "Patient not found";

/// List all patients, newest first
#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "Patients", body = Vec<Patient>),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn list_patients(State(server): State<MedAssistServer>) -> ApiResult<Json<Vec<Patient>>> {
    let patients = server
        .store
        .list_patients()
        .await
        .map_err(|e| store_failure("Error fetching patients", e))?;
    Ok(Json(patients))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient", body = Patient),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn get_patient(
    State(server): State<MedAssistServer>,
    id: RecordId,
) -> ApiResult<Json<Patient>> {
    let id = id.or_not_found(NOT_FOUND)?;
    server
        .store
        .get_patient(id)
        .await
        .map_err(|e| store_failure("Error fetching patient", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = NewPatient,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn create_patient(
    State(server): State<MedAssistServer>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let new = parse_payload(payload, INVALID)?;
    let patient = server
        .store
        .create_patient(&new)
        .await
        .map_err(|e| store_failure("Error creating patient", e))?;

    info!(patient_id = %patient.id, "Patient created");
    Ok((StatusCode::CREATED, Json(patient)))
}

/// Replace required fields; absent optional fields keep their value
#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = NewPatient,
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn update_patient(
    State(server): State<MedAssistServer>,
    id: RecordId,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> ApiResult<Json<Patient>> {
    let changes = parse_payload(payload, INVALID)?;
    let id = id.or_not_found(NOT_FOUND)?;
    let patient = server
        .store
        .update_patient(id, &changes)
        .await
        .map_err(|e| store_failure("Error updating patient", e))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(patient_id = %patient.id, "Patient updated");
    Ok(Json(patient))
}

/// Fails while consultations or appointments still reference the patient
#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageResponse),
        (status = 500, description = "Patient still referenced", body = crate::error::ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn delete_patient(
    State(server): State<MedAssistServer>,
    RecordId(id): RecordId,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(id) = id {
        server
            .store
            .delete_patient(id)
            .await
            .map_err(|e| store_failure("Error deleting patient", e))?;
        info!(patient_id = %id, "Patient deleted");
    }
    Ok(MessageResponse::new("Patient deleted"))
}

/// Consultations of one patient, most recent visit first
#[utoipa::path(
    get,
    path = "/api/patients/{id}/consultations",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Consultations", body = Vec<Consultation>),
        (status = 404, description = "Unknown patient", body = crate::error::ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn list_patient_consultations(
    State(server): State<MedAssistServer>,
    id: RecordId,
) -> ApiResult<Json<Vec<Consultation>>> {
    let id = require_patient(&server, id).await?;
    let consultations = server
        .store
        .list_consultations_for_patient(id)
        .await
        .map_err(|e| store_failure("Error fetching consultations", e))?;
    Ok(Json(consultations))
}

/// Appointments of one patient, earliest first
#[utoipa::path(
    get,
    path = "/api/patients/{id}/appointments",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Appointments", body = Vec<Appointment>),
        (status = 404, description = "Unknown patient", body = crate::error::ApiErrorResponse)
    ),
    tag = "patients"
)]
pub async fn list_patient_appointments(
    State(server): State<MedAssistServer>,
    id: RecordId,
) -> ApiResult<Json<Vec<Appointment>>> {
    let id = require_patient(&server, id).await?;
    let appointments = server
        .store
        .list_appointments_for_patient(id)
        .await
        .map_err(|e| store_failure("Error fetching appointments", e))?;
    Ok(Json(appointments))
}

async fn require_patient(server: &MedAssistServer, id: RecordId) -> ApiResult<uuid::Uuid> {
    let id = id.or_not_found(NOT_FOUND)?;
    match server.store.get_patient(id).await {
        Ok(Some(_)) => Ok(id),
        Ok(None) => Err(ApiError::not_found(NOT_FOUND)),
        Err(e) => Err(store_failure("Error fetching patient", e)),
    }
}
