// Router-level tests against the in-memory store and an instant assistant
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::{
    async_trait,
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use clinical_assistant::{
    AssistantError, AssistantResult, ClinicalAssistant, MedicationSuggestion,
};
use config_engine::AppConfig;
use database_layer::MemoryClinicStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use medassist_server::{create_app, MedAssistServer};

/// Test configuration for API tests
struct TestConfig {
    app: Router,
}

impl TestConfig {
    fn new() -> Self {
        Self::with_server(MedAssistServer::in_memory(AppConfig::default()))
    }

    fn with_server(server: MedAssistServer) -> Self {
        Self {
            app: create_app(server),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    async fn create_patient(&self, first_name: &str) -> String {
        let (status, patient) = self.post("/api/patients", patient_payload(first_name)).await;
        assert_eq!(status, StatusCode::CREATED);
        patient["id"].as_str().unwrap().to_string()
    }
}

fn patient_payload(first_name: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Benali",
        "dateOfBirth": "1985-03-12T00:00:00Z",
        "gender": "M",
        "phone": "0550 12 34 56",
        "allergies": "Pénicilline"
    })
}

fn appointment_payload(patient_id: &str, date: &str) -> Value {
    json!({
        "patientId": patient_id,
        "date": date,
        "type": "consultation"
    })
}

// ============================================================================
// Patients
// ============================================================================

#[tokio::test]
async fn test_create_then_get_patient_returns_same_fields() {
    let config = TestConfig::new();
    let payload = patient_payload("Karim");

    let (status, created) = config.post("/api/patients", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_string());
    assert!(created["createdAt"].is_string());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = config.get(&format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    for field in ["firstName", "lastName", "dateOfBirth", "gender", "phone", "allergies"] {
        assert_eq!(fetched[field], payload[field], "field {field}");
    }
    assert_eq!(fetched["email"], Value::Null);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_patients_newest_first() {
    let config = TestConfig::new();
    config.create_patient("Amine").await;
    config.create_patient("Yasmine").await;

    let (status, patients) = config.get("/api/patients").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = patients
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Yasmine", "Amine"]);
}

#[tokio::test]
async fn test_create_patient_missing_field_is_rejected() {
    let config = TestConfig::new();
    let (status, body) = config
        .post("/api/patients", json!({ "firstName": "Karim", "gender": "M" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid patient data");
    assert_eq!(body["errorType"], "validation_error");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let config = TestConfig::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/patients")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = config.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_patient_is_not_found() {
    let config = TestConfig::new();

    let (status, body) = config
        .get("/api/patients/7b0c5c1e-8f5a-4d3e-9a57-3f0f3f6f2a11")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Patient not found");

    let (status, _) = config.get("/api/patients/not-a-uuid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_patient_keeps_absent_optional_fields() {
    let config = TestConfig::new();
    let id = config.create_patient("Karim").await;

    let (status, updated) = config
        .put(
            &format!("/api/patients/{id}"),
            json!({
                "firstName": "Karim",
                "lastName": "Haddad",
                "dateOfBirth": "1985-03-12T00:00:00Z",
                "gender": "M",
                "email": "karim@example.dz"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["lastName"], "Haddad");
    assert_eq!(updated["email"], "karim@example.dz");
    assert_eq!(updated["allergies"], "Pénicilline");
}

#[tokio::test]
async fn test_update_patient_clears_explicit_null() {
    let config = TestConfig::new();
    let id = config.create_patient("Karim").await;

    let (status, updated) = config
        .put(
            &format!("/api/patients/{id}"),
            json!({
                "firstName": "Karim",
                "lastName": "Benali",
                "dateOfBirth": "1985-03-12T00:00:00Z",
                "gender": "M",
                "allergies": null
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["allergies"], Value::Null);
    assert_eq!(updated["phone"], "0550 12 34 56");

    let (_, fetched) = config.get(&format!("/api/patients/{id}")).await;
    assert_eq!(fetched["allergies"], Value::Null);
}

#[tokio::test]
async fn test_update_unknown_patient_is_not_found() {
    let config = TestConfig::new();
    let (status, _) = config
        .put(
            "/api/patients/7b0c5c1e-8f5a-4d3e-9a57-3f0f3f6f2a11",
            patient_payload("Karim"),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_patient_is_idempotent() {
    let config = TestConfig::new();
    let id = config.create_patient("Karim").await;

    let (status, body) = config.delete(&format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient deleted");

    let (status, _) = config.get(&format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again, or deleting an id that never existed, still succeeds
    let (status, _) = config.delete(&format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = config.delete("/api/patients/not-a-uuid").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_referenced_patient_fails() {
    let config = TestConfig::new();
    let id = config.create_patient("Karim").await;
    let (status, _) = config
        .post(
            "/api/consultations",
            json!({ "patientId": id, "chiefComplaint": "Toux" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = config.delete(&format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error deleting patient");

    let (status, _) = config.get(&format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Consultations
// ============================================================================

#[tokio::test]
async fn test_consultation_for_unknown_patient_is_rejected() {
    let config = TestConfig::new();
    let (status, body) = config
        .post(
            "/api/consultations",
            json!({
                "patientId": "7b0c5c1e-8f5a-4d3e-9a57-3f0f3f6f2a11",
                "chiefComplaint": "Fièvre"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid consultation data");
}

#[tokio::test]
async fn test_consultation_crud() {
    let config = TestConfig::new();
    let patient_id = config.create_patient("Karim").await;

    let (status, created) = config
        .post(
            "/api/consultations",
            json!({
                "patientId": patient_id,
                "chiefComplaint": "Fièvre",
                "symptoms": "Fièvre et toux",
                "aiSuggestions": { "diagnosis": ["Grippe"] }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["date"].is_string());
    assert_eq!(created["aiSuggestions"]["diagnosis"][0], "Grippe");
    let id = created["id"].as_str().unwrap();

    let (status, updated) = config
        .put(
            &format!("/api/consultations/{id}"),
            json!({
                "patientId": patient_id,
                "chiefComplaint": "Fièvre",
                "diagnosis": "Grippe"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["diagnosis"], "Grippe");
    assert_eq!(updated["symptoms"], "Fièvre et toux");

    let (status, for_patient) = config
        .get(&format!("/api/patients/{patient_id}/consultations"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(for_patient.as_array().unwrap().len(), 1);

    let (status, body) = config.delete(&format!("/api/consultations/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Consultation deleted");

    let (status, _) = config.get(&format!("/api/consultations/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patient_sublists_require_known_patient() {
    let config = TestConfig::new();
    let (status, _) = config
        .get("/api/patients/7b0c5c1e-8f5a-4d3e-9a57-3f0f3f6f2a11/appointments")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Appointments
// ============================================================================

#[tokio::test]
async fn test_appointment_defaults_and_ordering() {
    let config = TestConfig::new();
    let patient_id = config.create_patient("Karim").await;

    let (status, later) = config
        .post(
            "/api/appointments",
            appointment_payload(&patient_id, "2030-06-02T09:00:00Z"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(later["duration"], 30);
    assert_eq!(later["status"], "scheduled");
    assert_eq!(later["type"], "consultation");

    let (status, _) = config
        .post(
            "/api/appointments",
            appointment_payload(&patient_id, "2030-06-01T09:00:00Z"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, appointments) = config.get("/api/appointments").await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = appointments
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2030-06-01T09:00:00Z", "2030-06-02T09:00:00Z"]);
}

#[tokio::test]
async fn test_update_unknown_appointment_is_not_found() {
    let config = TestConfig::new();
    let patient_id = config.create_patient("Karim").await;

    let (status, body) = config
        .put(
            "/api/appointments/7b0c5c1e-8f5a-4d3e-9a57-3f0f3f6f2a11",
            appointment_payload(&patient_id, "2030-06-01T09:00:00Z"),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Appointment not found");
}

#[tokio::test]
async fn test_appointment_invalid_duration_is_rejected() {
    let config = TestConfig::new();
    let patient_id = config.create_patient("Karim").await;
    let mut payload = appointment_payload(&patient_id, "2030-06-01T09:00:00Z");
    payload["duration"] = json!(0);

    let (status, body) = config.post("/api/appointments", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid appointment data");
}

// ============================================================================
// Medications and templates
// ============================================================================

#[tokio::test]
async fn test_medications_sorted_by_name() {
    let config = TestConfig::new();
    for name in ["Paracétamol", "Amoxicilline", "Metformine"] {
        let (status, _) = config
            .post("/api/medications", json!({ "name": name, "form": "comprimé" }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, medications) = config.get("/api/medications").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = medications
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Amoxicilline", "Metformine", "Paracétamol"]);
}

#[tokio::test]
async fn test_template_crud() {
    let config = TestConfig::new();
    let (status, created) = config
        .post(
            "/api/templates",
            json!({ "name": "Ordonnance", "type": "prescription", "content": "{{patient}}" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["isDefault"], false);
    let id = created["id"].as_str().unwrap();

    let (status, updated) = config
        .put(
            &format!("/api/templates/{id}"),
            json!({
                "name": "Ordonnance",
                "type": "prescription",
                "content": "{{patient}}",
                "isDefault": true
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isDefault"], true);

    let (status, _) = config.delete(&format!("/api/templates/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = config.get(&format!("/api/templates/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Template not found");
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_upsert_keeps_single_row() {
    let config = TestConfig::new();

    let (status, settings) = config.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings, Value::Null);

    let (status, first) = config
        .put(
            "/api/settings",
            json!({ "practiceName": "Cabinet El Amel", "doctorName": "Dr. Saadi" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["practiceName"], "Cabinet El Amel");
    assert_eq!(first["primaryColor"], "#3b82f6");
    assert_eq!(first["documentFormat"], "A4");
    assert_eq!(first["defaultLanguage"], "FR");

    let (status, fetched) = config.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["doctorName"], "Dr. Saadi");

    let (status, second) = config
        .put(
            "/api/settings",
            json!({
                "practiceName": "Cabinet El Amel",
                "doctorName": "Dr. Saadi",
                "specialty": "Médecine générale"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["specialty"], "Médecine générale");
}

#[tokio::test]
async fn test_settings_null_clears_or_restores_default() {
    let config = TestConfig::new();
    let (status, _) = config
        .put(
            "/api/settings",
            json!({
                "practiceName": "Cabinet El Amel",
                "doctorName": "Dr. Saadi",
                "footerText": "Sur rendez-vous",
                "primaryColor": "#1d4ed8"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, settings) = config
        .put(
            "/api/settings",
            json!({
                "practiceName": "Cabinet El Amel",
                "doctorName": "Dr. Saadi",
                "footerText": null,
                "primaryColor": null
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["footerText"], Value::Null);
    assert_eq!(settings["primaryColor"], "#3b82f6");
}

#[tokio::test]
async fn test_settings_invalid_color_is_rejected() {
    let config = TestConfig::new();
    let (status, body) = config
        .put(
            "/api/settings",
            json!({
                "practiceName": "Cabinet",
                "doctorName": "Dr. Saadi",
                "primaryColor": "blue"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid settings data");
}

// ============================================================================
// Stats
// ============================================================================

#[tokio::test]
async fn test_stats_count_scheduled_appointments_only() {
    let config = TestConfig::new();

    let (status, empty) = config.get("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        empty,
        json!({
            "totalPatients": 0,
            "consultationsToday": 0,
            "appointmentsToday": 0,
            "pendingReports": 0
        })
    );

    let patient_id = config.create_patient("Karim").await;
    config.create_patient("Nadia").await;
    config
        .post(
            "/api/consultations",
            json!({ "patientId": patient_id, "chiefComplaint": "Toux" }),
        )
        .await;
    config
        .post(
            "/api/appointments",
            appointment_payload(&patient_id, "2030-06-01T09:00:00Z"),
        )
        .await;
    let mut completed = appointment_payload(&patient_id, "2030-05-01T09:00:00Z");
    completed["status"] = json!("completed");
    config.post("/api/appointments", completed).await;

    let (status, stats) = config.get("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalPatients"], 2);
    assert_eq!(stats["consultationsToday"], 1);
    assert_eq!(stats["appointmentsToday"], 1);
    assert_eq!(stats["pendingReports"], 0);
}

// ============================================================================
// Assistant
// ============================================================================

#[tokio::test]
async fn test_suggest_diagnosis() {
    let config = TestConfig::new();

    let (status, body) = config
        .post(
            "/api/ai/suggest-diagnosis",
            json!({ "symptoms": "Forte fièvre depuis hier" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let suggestions = body["suggestions"].as_array().unwrap();
    for expected in ["Infection virale", "Grippe", "Infection bactérienne"] {
        assert!(suggestions.contains(&json!(expected)), "missing {expected}");
    }

    let (status, body) = config
        .post("/api/ai/suggest-diagnosis", json!({ "symptoms": "rien" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["suggestions"],
        json!([
            "Examen clinique nécessaire",
            "Bilan sanguin recommandé",
            "Consultation spécialisée à envisager"
        ])
    );
}

#[tokio::test]
async fn test_summarize() {
    let config = TestConfig::new();

    let (status, body) = config
        .post("/api/ai/summarize", json!({ "text": "A. B. C." }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "A. B.");

    let (status, body) = config.post("/api/ai/summarize", json!({ "text": "" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Résumé non disponible.");
}

#[tokio::test]
async fn test_suggest_medication() {
    let config = TestConfig::new();

    let (status, body) = config
        .post(
            "/api/ai/suggest-medication",
            json!({ "diagnosis": "Hypertension artérielle" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let amlodipine = body["medications"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == "Amlodipine")
        .expect("Amlodipine suggested");
    assert_eq!(amlodipine["dosage"], "5mg 1x/jour");
}

/// Assistant whose engine is always down
struct UnavailableAssistant;

#[async_trait]
impl ClinicalAssistant for UnavailableAssistant {
    async fn suggest_diagnosis(&self, _symptoms: &str) -> AssistantResult<Vec<String>> {
        Err(AssistantError::Unavailable("engine offline".to_string()))
    }

    async fn summarize(&self, _text: &str) -> AssistantResult<String> {
        Err(AssistantError::Unavailable("engine offline".to_string()))
    }

    async fn suggest_medication(&self, _diagnosis: &str) -> AssistantResult<Vec<MedicationSuggestion>> {
        Err(AssistantError::Unavailable("engine offline".to_string()))
    }
}

#[tokio::test]
async fn test_assistant_failure_is_internal_error() {
    let server = MedAssistServer::with_components(
        AppConfig::default(),
        Arc::new(MemoryClinicStore::new()),
        Arc::new(UnavailableAssistant),
    );
    let config = TestConfig::with_server(server);

    let (status, body) = config
        .post("/api/ai/summarize", json!({ "text": "A. B." }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error generating summary");
    assert_eq!(body["code"], "ASSIST_5001");
    assert!(!body["message"].as_str().unwrap().contains("offline"));

    let (status, body) = config
        .post("/api/ai/suggest-diagnosis", json!({ "symptoms": "fièvre" }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "ASSIST_5001");
}

#[tokio::test]
async fn test_assistant_rejects_missing_field() {
    let config = TestConfig::new();
    let (status, _) = config
        .post("/api/ai/summarize", json!({ "content": "A. B." }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Health, documentation and dashboard
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let config = TestConfig::new();
    let (status, body) = config.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["store_healthy"], true);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let config = TestConfig::new();
    let (status, body) = config.get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "MedAssist DZ API");
    assert!(body["paths"]["/api/stats"].is_object());
}

#[tokio::test]
async fn test_dashboard_page() {
    let config = TestConfig::new();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = config.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("Tableau de Bord - MedAssist DZ"));
    assert!(page.contains("Chargement..."));
    assert!(page.contains("/api/stats"));
}
