use axum::Json;
use utoipa::OpenApi;

/// OpenAPI document for the MedAssist API
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::stats::get_stats,

        crate::handlers::patients::list_patients,
        crate::handlers::patients::get_patient,
        crate::handlers::patients::create_patient,
        crate::handlers::patients::update_patient,
        crate::handlers::patients::delete_patient,
        crate::handlers::patients::list_patient_consultations,
        crate::handlers::patients::list_patient_appointments,

        crate::handlers::consultations::list_consultations,
        crate::handlers::consultations::get_consultation,
        crate::handlers::consultations::create_consultation,
        crate::handlers::consultations::update_consultation,
        crate::handlers::consultations::delete_consultation,

        crate::handlers::appointments::list_appointments,
        crate::handlers::appointments::get_appointment,
        crate::handlers::appointments::create_appointment,
        crate::handlers::appointments::update_appointment,
        crate::handlers::appointments::delete_appointment,

        crate::handlers::medications::list_medications,
        crate::handlers::medications::get_medication,
        crate::handlers::medications::create_medication,
        crate::handlers::medications::update_medication,
        crate::handlers::medications::delete_medication,

        crate::handlers::templates::list_templates,
        crate::handlers::templates::get_template,
        crate::handlers::templates::create_template,
        crate::handlers::templates::update_template,
        crate::handlers::templates::delete_template,

        crate::handlers::settings::get_settings,
        crate::handlers::settings::update_settings,

        crate::handlers::assistant::suggest_diagnosis,
        crate::handlers::assistant::summarize,
        crate::handlers::assistant::suggest_medication,
    ),
    components(
        schemas(
            database_layer::Patient,
            database_layer::NewPatient,
            database_layer::Consultation,
            database_layer::NewConsultation,
            database_layer::Appointment,
            database_layer::NewAppointment,
            database_layer::Medication,
            database_layer::NewMedication,
            database_layer::Template,
            database_layer::NewTemplate,
            database_layer::Settings,
            database_layer::NewSettings,

            clinical_assistant::MedicationSuggestion,
            crate::handlers::assistant::DiagnosisRequest,
            crate::handlers::assistant::DiagnosisResponse,
            crate::handlers::assistant::SummaryRequest,
            crate::handlers::assistant::SummaryResponse,
            crate::handlers::assistant::MedicationRequest,
            crate::handlers::assistant::MedicationResponse,

            crate::handlers::common::MessageResponse,
            crate::handlers::health::HealthResponse,
            crate::handlers::stats::DashboardStats,
            crate::error::ApiErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and store health"),
        (name = "stats", description = "Dashboard counters"),
        (name = "patients", description = "Patient records"),
        (name = "consultations", description = "Recorded visits"),
        (name = "appointments", description = "Appointment scheduling"),
        (name = "medications", description = "Medication formulary"),
        (name = "templates", description = "Document templates"),
        (name = "settings", description = "Practice settings"),
        (name = "assistant", description = "Keyword-based clinical suggestions"),
    ),
    info(
        title = "MedAssist DZ API",
        description = "Clinic management API: patients, consultations, appointments, formulary, document templates and practice settings.",
        contact(name = "MedAssist Team", email = "team@medassist.dz"),
        license(name = "AGPL-3.0-only"),
    ),
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
