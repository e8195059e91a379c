//! Mock clinical assistant endpoints
//!
//! Input text may describe a patient, so it only reaches the log after
//! passing through the PII redactor.
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use clinical_assistant::{AssistantError, MedicationSuggestion};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::parse_payload;
use crate::server::MedAssistServer;
use crate::validation::RequestValidation;

const INVALID: &str = "Invalid request data";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiagnosisRequest {
    #[schema(example = "Fièvre et toux depuis trois jours")]
    pub symptoms: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiagnosisResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MedicationRequest {
    #[schema(example = "Hypertension artérielle")]
    pub diagnosis: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MedicationResponse {
    pub medications: Vec<MedicationSuggestion>,
}

// Empty text is a valid request; the assistant answers with its fallback.
impl RequestValidation for DiagnosisRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

impl RequestValidation for SummaryRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

impl RequestValidation for MedicationRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

fn assistant_failure(message: &'static str, err: AssistantError) -> ApiError {
    error!(error = %err, "{}", message);
    ApiError::assistant(message)
}

/// Candidate diagnoses for free-text symptoms, at most five
#[utoipa::path(
    post,
    path = "/api/ai/suggest-diagnosis",
    request_body = DiagnosisRequest,
    responses(
        (status = 200, description = "Suggested diagnoses", body = DiagnosisResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse)
    ),
    tag = "assistant"
)]
pub async fn suggest_diagnosis(
    State(server): State<MedAssistServer>,
    payload: Result<Json<DiagnosisRequest>, JsonRejection>,
) -> ApiResult<Json<DiagnosisResponse>> {
    let request = parse_payload(payload, INVALID)?;
    debug!(symptoms = %server.redactor.redact(&request.symptoms), "Diagnosis suggestion requested");

    let suggestions = server
        .assistant
        .suggest_diagnosis(&request.symptoms)
        .await
        .map_err(|e| assistant_failure("Error generating diagnosis suggestions", e))?;
    Ok(Json(DiagnosisResponse { suggestions }))
}

/// First two sentences of a consultation note
#[utoipa::path(
    post,
    path = "/api/ai/summarize",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Summary", body = SummaryResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse)
    ),
    tag = "assistant"
)]
pub async fn summarize(
    State(server): State<MedAssistServer>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> ApiResult<Json<SummaryResponse>> {
    let request = parse_payload(payload, INVALID)?;
    debug!(chars = request.text.chars().count(), "Summary requested");

    let summary = server
        .assistant
        .summarize(&request.text)
        .await
        .map_err(|e| assistant_failure("Error generating summary", e))?;
    Ok(Json(SummaryResponse { summary }))
}

#[utoipa::path(
    post,
    path = "/api/ai/suggest-medication",
    request_body = MedicationRequest,
    responses(
        (status = 200, description = "Suggested treatments", body = MedicationResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ApiErrorResponse)
    ),
    tag = "assistant"
)]
pub async fn suggest_medication(
    State(server): State<MedAssistServer>,
    payload: Result<Json<MedicationRequest>, JsonRejection>,
) -> ApiResult<Json<MedicationResponse>> {
    let request = parse_payload(payload, INVALID)?;
    debug!(diagnosis = %server.redactor.redact(&request.diagnosis), "Medication suggestion requested");

    let medications = server
        .assistant
        .suggest_medication(&request.diagnosis)
        .await
        .map_err(|e| assistant_failure("Error suggesting medications", e))?;
    Ok(Json(MedicationResponse { medications }))
}
