pub mod extractors;

pub use extractors::*;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::server::MedAssistServer;

/// Request timing middleware
pub async fn request_timing_middleware(
    State(server): State<MedAssistServer>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let slow_after = Duration::from_secs(server.config.server.request_timeout_secs);

    if elapsed > slow_after {
        tracing::warn!(
            method = %method,
            uri = %uri,
            duration_ms = elapsed.as_millis(),
            status = response.status().as_u16(),
            "Slow request"
        );
    } else {
        tracing::info!(
            method = %method,
            uri = %uri,
            duration_ms = elapsed.as_millis(),
            status = response.status().as_u16(),
            "Request processed"
        );
    }

    response
}

/// Audit logging middleware for writes to clinic records
pub async fn audit_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let is_write = matches!(method, Method::POST | Method::PUT | Method::DELETE);

    let response = next.run(request).await;

    if is_write && path.starts_with("/api/") {
        tracing::info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "Audit log: record change"
        );
    }

    response
}

/// Create CORS layer for the application
///
/// Any local origin is accepted so the dashboard can be served from a dev
/// server on another port.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(is_local_origin)
                .unwrap_or(false)
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

fn is_local_origin(origin: &str) -> bool {
    let host = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .unwrap_or("");
    let host = host.split(':').next().unwrap_or("");
    matches!(host, "localhost" | "127.0.0.1")
}
