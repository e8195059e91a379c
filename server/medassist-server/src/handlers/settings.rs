use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use database_layer::{NewSettings, Settings, SettingsRepository};
use tracing::info;

use crate::error::ApiResult;
use crate::handlers::common::{parse_payload, store_failure};
use crate::server::MedAssistServer;

/// Practice settings, `null` until the first save
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Settings, or null before the first save", body = Settings),
        (status = 500, description = "Store failure", body = crate::error::ApiErrorResponse)
    ),
    tag = "settings"
)]
pub async fn get_settings(State(server): State<MedAssistServer>) -> ApiResult<Json<Option<Settings>>> {
    let settings = server
        .store
        .get_settings()
        .await
        .map_err(|e| store_failure("Error fetching settings", e))?;
    Ok(Json(settings))
}

/// Create the settings row or update the existing one
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = NewSettings,
    responses(
        (status = 200, description = "Saved settings", body = Settings),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse)
    ),
    tag = "settings"
)]
pub async fn update_settings(
    State(server): State<MedAssistServer>,
    payload: Result<Json<NewSettings>, JsonRejection>,
) -> ApiResult<Json<Settings>> {
    let changes = parse_payload(payload, "Invalid settings data")?;
    let settings = server
        .store
        .upsert_settings(&changes)
        .await
        .map_err(|e| store_failure("Error updating settings", e))?;

    info!(settings_id = %settings.id, "Practice settings saved");
    Ok(Json(settings))
}
