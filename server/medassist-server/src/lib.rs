//! MedAssist DZ server - clinic records API
//!
//! This library provides the HTTP surface of MedAssist: CRUD endpoints for
//! patients, consultations, appointments, the medication formulary, document
//! templates and practice settings, the keyword-based consultation
//! assistant, dashboard statistics and the dashboard page itself.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::MedAssistServer;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: MedAssistServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn_with_state(
                    server.clone(),
                    middleware::request_timing_middleware,
                ))
                .layer(from_fn(middleware::audit_logging_middleware)),
        )
        .with_state(server)
}
