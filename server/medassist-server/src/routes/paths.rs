//! Route path constants
//!
//! utoipa `#[path(...)]` attributes need string literals, so the paths in
//! handler annotations must be kept in step with these by hand. Path
//! parameters use the axum 0.7 `:id` form.

pub const API: &str = "/api";
pub const HEALTH: &str = "/health";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const DASHBOARD: &str = "/";

/// Paths below are relative to [`API`]
pub mod stats {
    pub const STATS: &str = "/stats";
}

pub mod patients {
    pub const PATIENTS: &str = "/patients";
    pub const PATIENT_BY_ID: &str = "/patients/:id";
    pub const PATIENT_CONSULTATIONS: &str = "/patients/:id/consultations";
    pub const PATIENT_APPOINTMENTS: &str = "/patients/:id/appointments";
}

pub mod consultations {
    pub const CONSULTATIONS: &str = "/consultations";
    pub const CONSULTATION_BY_ID: &str = "/consultations/:id";
}

pub mod appointments {
    pub const APPOINTMENTS: &str = "/appointments";
    pub const APPOINTMENT_BY_ID: &str = "/appointments/:id";
}

pub mod medications {
    pub const MEDICATIONS: &str = "/medications";
    pub const MEDICATION_BY_ID: &str = "/medications/:id";
}

pub mod templates {
    pub const TEMPLATES: &str = "/templates";
    pub const TEMPLATE_BY_ID: &str = "/templates/:id";
}

pub mod settings {
    pub const SETTINGS: &str = "/settings";
}

pub mod assistant {
    pub const SUGGEST_DIAGNOSIS: &str = "/ai/suggest-diagnosis";
    pub const SUMMARIZE: &str = "/ai/summarize";
    pub const SUGGEST_MEDICATION: &str = "/ai/suggest-medication";
}
