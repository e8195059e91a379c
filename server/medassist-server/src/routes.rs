pub mod paths;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{
        appointments, assistant, consultations, dashboard, health, medications, patients,
        settings, stats, templates,
    },
    openapi,
    server::MedAssistServer,
};

/// Health check and API document
pub fn health_routes() -> Router<MedAssistServer> {
    Router::new()
        .route(paths::HEALTH, get(health::health_check))
        .route(paths::OPENAPI_JSON, get(openapi::openapi_json))
}

pub fn patient_routes() -> Router<MedAssistServer> {
    Router::new()
        .route(
            paths::patients::PATIENTS,
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            paths::patients::PATIENT_BY_ID,
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            paths::patients::PATIENT_CONSULTATIONS,
            get(patients::list_patient_consultations),
        )
        .route(
            paths::patients::PATIENT_APPOINTMENTS,
            get(patients::list_patient_appointments),
        )
}

pub fn consultation_routes() -> Router<MedAssistServer> {
    Router::new()
        .route(
            paths::consultations::CONSULTATIONS,
            get(consultations::list_consultations).post(consultations::create_consultation),
        )
        .route(
            paths::consultations::CONSULTATION_BY_ID,
            get(consultations::get_consultation)
                .put(consultations::update_consultation)
                .delete(consultations::delete_consultation),
        )
}

pub fn appointment_routes() -> Router<MedAssistServer> {
    Router::new()
        .route(
            paths::appointments::APPOINTMENTS,
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            paths::appointments::APPOINTMENT_BY_ID,
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
}

/// Formulary and document templates
pub fn reference_data_routes() -> Router<MedAssistServer> {
    Router::new()
        .route(
            paths::medications::MEDICATIONS,
            get(medications::list_medications).post(medications::create_medication),
        )
        .route(
            paths::medications::MEDICATION_BY_ID,
            get(medications::get_medication)
                .put(medications::update_medication)
                .delete(medications::delete_medication),
        )
        .route(
            paths::templates::TEMPLATES,
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            paths::templates::TEMPLATE_BY_ID,
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
}

/// Practice settings and dashboard counters
pub fn practice_routes() -> Router<MedAssistServer> {
    Router::new()
        .route(
            paths::settings::SETTINGS,
            get(settings::get_settings).put(settings::update_settings),
        )
        .route(paths::stats::STATS, get(stats::get_stats))
}

pub fn assistant_routes() -> Router<MedAssistServer> {
    Router::new()
        .route(paths::assistant::SUGGEST_DIAGNOSIS, post(assistant::suggest_diagnosis))
        .route(paths::assistant::SUMMARIZE, post(assistant::summarize))
        .route(paths::assistant::SUGGEST_MEDICATION, post(assistant::suggest_medication))
}

/// Everything mounted under `/api`
pub fn api_routes() -> Router<MedAssistServer> {
    Router::new()
        .merge(patient_routes())
        .merge(consultation_routes())
        .merge(appointment_routes())
        .merge(reference_data_routes())
        .merge(practice_routes())
        .merge(assistant_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<MedAssistServer> {
    Router::new()
        .route(paths::DASHBOARD, get(dashboard::dashboard))
        .merge(health_routes())
        .nest(paths::API, api_routes())
}
