use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use database_layer::{Appointment, AppointmentRepository, NewAppointment};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{parse_payload, store_failure, write_failure, MessageResponse};
use crate::middleware::RecordId;
use crate::server::MedAssistServer;

const INVALID: &str = "Invalid appointment data";
const NOT_FOUND: &str = "Appointment not found";

/// List all appointments, earliest first
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "Appointments", body = Vec<Appointment>),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn list_appointments(
    State(server): State<MedAssistServer>,
) -> ApiResult<Json<Vec<Appointment>>> {
    let appointments = server
        .store
        .list_appointments()
        .await
        .map_err(|e| store_failure("Error fetching appointments", e))?;
    Ok(Json(appointments))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = Appointment),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn get_appointment(
    State(server): State<MedAssistServer>,
    id: RecordId,
) -> ApiResult<Json<Appointment>> {
    let id = id.or_not_found(NOT_FOUND)?;
    server
        .store
        .get_appointment(id)
        .await
        .map_err(|e| store_failure("Error fetching appointment", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// Duration defaults to 30 minutes and status to `scheduled`
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = NewAppointment,
    responses(
        (status = 201, description = "Appointment scheduled", body = Appointment),
        (status = 400, description = "Invalid payload or unknown patient", body = crate::error::ApiErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn create_appointment(
    State(server): State<MedAssistServer>,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let new = parse_payload(payload, INVALID)?;
    let appointment = server
        .store
        .create_appointment(&new)
        .await
        .map_err(|e| write_failure(INVALID, "Error creating appointment", e))?;

    info!(
        appointment_id = %appointment.id,
        patient_id = %appointment.patient_id,
        date = %appointment.date,
        "Appointment scheduled"
    );
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = NewAppointment,
    responses(
        (status = 200, description = "Appointment updated", body = Appointment),
        (status = 400, description = "Invalid payload or unknown patient", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown id", body = crate::error::ApiErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn update_appointment(
    State(server): State<MedAssistServer>,
    id: RecordId,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> ApiResult<Json<Appointment>> {
    let changes = parse_payload(payload, INVALID)?;
    let id = id.or_not_found(NOT_FOUND)?;
    let appointment = server
        .store
        .update_appointment(id, &changes)
        .await
        .map_err(|e| write_failure(INVALID, "Error updating appointment", e))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(appointment_id = %appointment.id, status = %appointment.status, "Appointment updated");
    Ok(Json(appointment))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses((status = 200, description = "Appointment deleted", body = MessageResponse)),
    tag = "appointments"
)]
pub async fn delete_appointment(
    State(server): State<MedAssistServer>,
    RecordId(id): RecordId,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(id) = id {
        server
            .store
            .delete_appointment(id)
            .await
            .map_err(|e| store_failure("Error deleting appointment", e))?;
        info!(appointment_id = %id, "Appointment deleted");
    }
    Ok(MessageResponse::new("Appointment deleted"))
}
