use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::MedAssistServer;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Seconds since startup
    #[schema(example = 3600)]
    pub uptime: u64,
    /// Storage backend in use
    #[schema(example = "postgres")]
    pub backend: String,
    pub store_healthy: bool,
}

/// Liveness plus a round trip to the store
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server and store are healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(server): State<MedAssistServer>) -> (StatusCode, Json<HealthResponse>) {
    let store_healthy = server.store.is_healthy().await;
    let (status_code, status) = if store_healthy {
        (StatusCode::OK, "healthy")
    } else {
        tracing::warn!(backend = server.store.backend_name(), "Store health check failed");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime().as_secs(),
        backend: server.store.backend_name().to_string(),
        store_healthy,
    };

    (status_code, Json(response))
}
