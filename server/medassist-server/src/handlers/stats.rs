use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiResult;
use crate::handlers::common::store_failure;
use crate::server::MedAssistServer;

/// Counters shown on the dashboard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[schema(example = 128)]
    pub total_patients: i64,
    /// All recorded consultations
    pub consultations_today: i64,
    /// Appointments still in `scheduled` status
    pub appointments_today: i64,
    /// No reports domain exists yet, always 0
    pub pending_reports: i64,
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse)
    ),
    tag = "stats"
)]
pub async fn get_stats(State(server): State<MedAssistServer>) -> ApiResult<Json<DashboardStats>> {
    let counts = server
        .store
        .counts()
        .await
        .map_err(|e| store_failure("Error fetching statistics", e))?;

    Ok(Json(DashboardStats {
        total_patients: counts.patients,
        consultations_today: counts.consultations,
        appointments_today: counts.scheduled_appointments,
        pending_reports: 0,
    }))
}
