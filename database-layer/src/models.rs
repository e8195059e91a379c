// Database models and insert schemas
//
// Each table has a row type (what the store returns) and a `New*` insert
// schema (what clients send on create and update). Insert schemas are also
// used for updates: required fields are replaced, an absent optional field
// keeps its stored value and an explicit `null` clears it. On columns with an
// insert default, `null` restores the default.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_APPOINTMENT_DURATION: i32 = 30;
pub const DEFAULT_APPOINTMENT_STATUS: &str = "scheduled";
pub const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";
pub const DEFAULT_SECONDARY_COLOR: &str = "#10b981";
pub const DEFAULT_DOCUMENT_FORMAT: &str = "A4";
pub const DEFAULT_LANGUAGE: &str = "FR";

/// Optional field of an insert schema
///
/// `None` when the key is absent, `Some(None)` for an explicit `null`.
pub type Nullable<T> = Option<Option<T>>;

// Tells an absent key apart from `null`
mod nullable {
    pub(super) use serde_with::rust::double_option::{deserialize, serialize};
}

/// Value carried by a nullable field, `None` when absent or null
pub fn value_of<T>(field: &Nullable<T>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

// ============================================================================
// PATIENTS
// ============================================================================

/// Patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub current_medications: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Patient insert schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub phone: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub email: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub address: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub medical_history: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub allergies: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub current_medications: Nullable<String>,
}

impl Patient {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: &NewPatient) -> Self {
        Self {
            id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            date_of_birth: new.date_of_birth,
            gender: new.gender.clone(),
            phone: new.phone.clone().flatten(),
            email: new.email.clone().flatten(),
            address: new.address.clone().flatten(),
            medical_history: new.medical_history.clone().flatten(),
            allergies: new.allergies.clone().flatten(),
            current_medications: new.current_medications.clone().flatten(),
            created_at,
        }
    }

    pub fn apply(&mut self, changes: &NewPatient) {
        self.first_name = changes.first_name.clone();
        self.last_name = changes.last_name.clone();
        self.date_of_birth = changes.date_of_birth;
        self.gender = changes.gender.clone();
        keep_or_replace(&mut self.phone, &changes.phone);
        keep_or_replace(&mut self.email, &changes.email);
        keep_or_replace(&mut self.address, &changes.address);
        keep_or_replace(&mut self.medical_history, &changes.medical_history);
        keep_or_replace(&mut self.allergies, &changes.allergies);
        keep_or_replace(&mut self.current_medications, &changes.current_medications);
    }
}

// ============================================================================
// CONSULTATIONS
// ============================================================================

/// Recorded patient visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub date: DateTime<Utc>,
    pub chief_complaint: String,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
    pub follow_up_date: Option<DateTime<Utc>>,
    /// Assistant output saved alongside the visit, stored as-is
    pub ai_suggestions: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Consultation insert schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewConsultation {
    pub patient_id: Uuid,
    /// Defaults to the time of insertion
    pub date: Option<DateTime<Utc>>,
    pub chief_complaint: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub symptoms: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub diagnosis: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub treatment: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub notes: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub follow_up_date: Nullable<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<Object>)]
    pub ai_suggestions: Nullable<serde_json::Value>,
}

impl Consultation {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: &NewConsultation) -> Self {
        Self {
            id,
            patient_id: new.patient_id,
            date: new.date.unwrap_or(created_at),
            chief_complaint: new.chief_complaint.clone(),
            symptoms: new.symptoms.clone().flatten(),
            diagnosis: new.diagnosis.clone().flatten(),
            treatment: new.treatment.clone().flatten(),
            notes: new.notes.clone().flatten(),
            follow_up_date: new.follow_up_date.flatten(),
            ai_suggestions: new.ai_suggestions.clone().flatten(),
            created_at,
        }
    }

    pub fn apply(&mut self, changes: &NewConsultation) {
        self.patient_id = changes.patient_id;
        self.chief_complaint = changes.chief_complaint.clone();
        if let Some(date) = changes.date {
            self.date = date;
        }
        keep_or_replace(&mut self.symptoms, &changes.symptoms);
        keep_or_replace(&mut self.diagnosis, &changes.diagnosis);
        keep_or_replace(&mut self.treatment, &changes.treatment);
        keep_or_replace(&mut self.notes, &changes.notes);
        keep_or_replace(&mut self.follow_up_date, &changes.follow_up_date);
        keep_or_replace(&mut self.ai_suggestions, &changes.ai_suggestions);
    }
}

// ============================================================================
// APPOINTMENTS
// ============================================================================

/// Scheduled visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub date: DateTime<Utc>,
    /// Length in minutes
    pub duration: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub appointment_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Appointment insert schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub date: DateTime<Utc>,
    pub duration: Option<i32>,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub notes: Nullable<String>,
}

impl Appointment {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: &NewAppointment) -> Self {
        Self {
            id,
            patient_id: new.patient_id,
            date: new.date,
            duration: new.duration.unwrap_or(DEFAULT_APPOINTMENT_DURATION),
            appointment_type: new.appointment_type.clone(),
            status: new
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_APPOINTMENT_STATUS.to_string()),
            notes: new.notes.clone().flatten(),
            created_at,
        }
    }

    pub fn apply(&mut self, changes: &NewAppointment) {
        self.patient_id = changes.patient_id;
        self.date = changes.date;
        self.appointment_type = changes.appointment_type.clone();
        if let Some(duration) = changes.duration {
            self.duration = duration;
        }
        if let Some(status) = &changes.status {
            self.status = status.clone();
        }
        keep_or_replace(&mut self.notes, &changes.notes);
    }
}

// ============================================================================
// MEDICATIONS
// ============================================================================

/// Formulary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub generic_name: Option<String>,
    pub dosage: Option<String>,
    pub form: Option<String>,
    pub category: Option<String>,
    pub indications: Option<String>,
    pub contraindications: Option<String>,
    pub side_effects: Option<String>,
    pub interactions: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Medication insert schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMedication {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub generic_name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub dosage: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub form: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub category: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub indications: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub contraindications: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub side_effects: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub interactions: Nullable<String>,
}

impl Medication {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: &NewMedication) -> Self {
        Self {
            id,
            name: new.name.clone(),
            generic_name: new.generic_name.clone().flatten(),
            dosage: new.dosage.clone().flatten(),
            form: new.form.clone().flatten(),
            category: new.category.clone().flatten(),
            indications: new.indications.clone().flatten(),
            contraindications: new.contraindications.clone().flatten(),
            side_effects: new.side_effects.clone().flatten(),
            interactions: new.interactions.clone().flatten(),
            created_at,
        }
    }

    pub fn apply(&mut self, changes: &NewMedication) {
        self.name = changes.name.clone();
        keep_or_replace(&mut self.generic_name, &changes.generic_name);
        keep_or_replace(&mut self.dosage, &changes.dosage);
        keep_or_replace(&mut self.form, &changes.form);
        keep_or_replace(&mut self.category, &changes.category);
        keep_or_replace(&mut self.indications, &changes.indications);
        keep_or_replace(&mut self.contraindications, &changes.contraindications);
        keep_or_replace(&mut self.side_effects, &changes.side_effects);
        keep_or_replace(&mut self.interactions, &changes.interactions);
    }
}

// ============================================================================
// TEMPLATES
// ============================================================================

/// Document template (prescription, certificate, letter...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub template_type: String,
    pub content: String,
    pub is_default: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// Template insert schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<bool>)]
    pub is_default: Nullable<bool>,
}

impl Template {
    pub fn from_new(id: Uuid, created_at: DateTime<Utc>, new: &NewTemplate) -> Self {
        Self {
            id,
            name: new.name.clone(),
            template_type: new.template_type.clone(),
            content: new.content.clone(),
            is_default: Some(value_of(&new.is_default).copied().unwrap_or(false)),
            created_at,
        }
    }

    pub fn apply(&mut self, changes: &NewTemplate) {
        self.name = changes.name.clone();
        self.template_type = changes.template_type.clone();
        self.content = changes.content.clone();
        replace_or_default(&mut self.is_default, &changes.is_default, false);
    }
}

// ============================================================================
// PRACTICE SETTINGS
// ============================================================================

/// Practice configuration, at most one row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: Uuid,
    pub practice_name: String,
    pub doctor_name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub watermark_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub document_format: Option<String>,
    pub default_language: Option<String>,
    pub footer_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Settings insert schema
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSettings {
    pub practice_name: String,
    pub doctor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub specialty: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub phone: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub email: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub address: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub logo_url: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub watermark_url: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub primary_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub secondary_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub document_format: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub default_language: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub footer_text: Nullable<String>,
}

impl Settings {
    pub fn from_new(id: Uuid, now: DateTime<Utc>, new: &NewSettings) -> Self {
        Self {
            id,
            practice_name: new.practice_name.clone(),
            doctor_name: new.doctor_name.clone(),
            specialty: new.specialty.clone().flatten(),
            phone: new.phone.clone().flatten(),
            email: new.email.clone().flatten(),
            address: new.address.clone().flatten(),
            logo_url: new.logo_url.clone().flatten(),
            watermark_url: new.watermark_url.clone().flatten(),
            primary_color: Some(or_default(&new.primary_color, DEFAULT_PRIMARY_COLOR)),
            secondary_color: Some(or_default(&new.secondary_color, DEFAULT_SECONDARY_COLOR)),
            document_format: Some(or_default(&new.document_format, DEFAULT_DOCUMENT_FORMAT)),
            default_language: Some(or_default(&new.default_language, DEFAULT_LANGUAGE)),
            footer_text: new.footer_text.clone().flatten(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &NewSettings, now: DateTime<Utc>) {
        self.practice_name = changes.practice_name.clone();
        self.doctor_name = changes.doctor_name.clone();
        keep_or_replace(&mut self.specialty, &changes.specialty);
        keep_or_replace(&mut self.phone, &changes.phone);
        keep_or_replace(&mut self.email, &changes.email);
        keep_or_replace(&mut self.address, &changes.address);
        keep_or_replace(&mut self.logo_url, &changes.logo_url);
        keep_or_replace(&mut self.watermark_url, &changes.watermark_url);
        replace_or_default(&mut self.primary_color, &changes.primary_color, DEFAULT_PRIMARY_COLOR.to_string());
        replace_or_default(&mut self.secondary_color, &changes.secondary_color, DEFAULT_SECONDARY_COLOR.to_string());
        replace_or_default(&mut self.document_format, &changes.document_format, DEFAULT_DOCUMENT_FORMAT.to_string());
        replace_or_default(&mut self.default_language, &changes.default_language, DEFAULT_LANGUAGE.to_string());
        keep_or_replace(&mut self.footer_text, &changes.footer_text);
        self.updated_at = now;
    }
}

/// Same rule as `CASE WHEN $present THEN $value ELSE column END` in the SQL updates
fn keep_or_replace<T: Clone>(current: &mut Option<T>, incoming: &Nullable<T>) {
    if let Some(value) = incoming {
        *current = value.clone();
    }
}

fn replace_or_default<T: Clone>(current: &mut Option<T>, incoming: &Nullable<T>, default: T) {
    if let Some(value) = incoming {
        *current = Some(value.clone().unwrap_or(default));
    }
}

fn or_default(value: &Nullable<String>, default: &str) -> String {
    value_of(value).cloned().unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_patient() -> NewPatient {
        NewPatient {
            first_name: "Amina".to_string(),
            last_name: "Haddad".to_string(),
            date_of_birth: Utc.with_ymd_and_hms(1985, 3, 14, 0, 0, 0).unwrap(),
            gender: "F".to_string(),
            phone: Some(Some("0555 12 34 56".to_string())),
            email: None,
            address: None,
            medical_history: None,
            allergies: Some(Some("Pénicilline".to_string())),
            current_medications: None,
        }
    }

    #[test]
    fn test_patient_json_uses_camel_case() {
        let patient = Patient::from_new(Uuid::new_v4(), Utc::now(), &sample_patient());
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["firstName"], "Amina");
        assert!(json.get("dateOfBirth").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_patient_update_keeps_absent_optionals() {
        let mut patient = Patient::from_new(Uuid::new_v4(), Utc::now(), &sample_patient());
        let mut changes = sample_patient();
        changes.last_name = "Haddad-Benali".to_string();
        changes.allergies = None;
        changes.email = Some(Some("amina@example.dz".to_string()));

        patient.apply(&changes);

        assert_eq!(patient.last_name, "Haddad-Benali");
        assert_eq!(patient.allergies.as_deref(), Some("Pénicilline"));
        assert_eq!(patient.email.as_deref(), Some("amina@example.dz"));
    }

    #[test]
    fn test_null_and_absent_are_distinct() {
        let changes: NewPatient = serde_json::from_value(serde_json::json!({
            "firstName": "Amina",
            "lastName": "Haddad",
            "dateOfBirth": "1985-03-14T00:00:00Z",
            "gender": "F",
            "allergies": null,
            "phone": "0555 12 34 56"
        }))
        .unwrap();

        assert_eq!(changes.allergies, Some(None));
        assert_eq!(changes.email, None);
        assert_eq!(changes.phone, Some(Some("0555 12 34 56".to_string())));
    }

    #[test]
    fn test_patient_update_clears_null_optionals() {
        let mut patient = Patient::from_new(Uuid::new_v4(), Utc::now(), &sample_patient());
        let mut changes = sample_patient();
        changes.allergies = Some(None);
        changes.phone = None;

        patient.apply(&changes);

        assert_eq!(patient.allergies, None);
        assert_eq!(patient.phone.as_deref(), Some("0555 12 34 56"));
    }

    #[test]
    fn test_template_null_restores_default_flag() {
        let new: NewTemplate = serde_json::from_value(serde_json::json!({
            "name": "Certificat",
            "type": "certificate",
            "content": "...",
            "isDefault": true
        }))
        .unwrap();
        let mut template = Template::from_new(Uuid::new_v4(), Utc::now(), &new);
        assert_eq!(template.is_default, Some(true));

        let mut changes = new.clone();
        changes.is_default = Some(None);
        template.apply(&changes);
        assert_eq!(template.is_default, Some(false));
    }

    #[test]
    fn test_appointment_defaults() {
        let new: NewAppointment = serde_json::from_value(serde_json::json!({
            "patientId": Uuid::new_v4(),
            "date": "2024-06-01T09:00:00Z",
            "type": "consultation"
        }))
        .unwrap();
        let appointment = Appointment::from_new(Uuid::new_v4(), Utc::now(), &new);
        assert_eq!(appointment.duration, DEFAULT_APPOINTMENT_DURATION);
        assert_eq!(appointment.status, "scheduled");
        assert_eq!(appointment.appointment_type, "consultation");
    }

    #[test]
    fn test_consultation_date_defaults_to_creation() {
        let created_at = Utc::now();
        let new = NewConsultation {
            patient_id: Uuid::new_v4(),
            date: None,
            chief_complaint: "Toux".to_string(),
            symptoms: None,
            diagnosis: None,
            treatment: None,
            notes: None,
            follow_up_date: None,
            ai_suggestions: None,
        };
        let consultation = Consultation::from_new(Uuid::new_v4(), created_at, &new);
        assert_eq!(consultation.date, created_at);
    }

    #[test]
    fn test_settings_defaults_and_update() {
        let new: NewSettings = serde_json::from_value(serde_json::json!({
            "practiceName": "Cabinet El Amel",
            "doctorName": "Dr. Mansouri"
        }))
        .unwrap();
        let created = Utc::now();
        let mut settings = Settings::from_new(Uuid::new_v4(), created, &new);
        assert_eq!(settings.primary_color.as_deref(), Some(DEFAULT_PRIMARY_COLOR));
        assert_eq!(settings.secondary_color.as_deref(), Some(DEFAULT_SECONDARY_COLOR));
        assert_eq!(settings.document_format.as_deref(), Some("A4"));
        assert_eq!(settings.default_language.as_deref(), Some("FR"));

        let later = created + chrono::Duration::minutes(5);
        let mut changes = new.clone();
        changes.doctor_name = "Dr. K. Mansouri".to_string();
        changes.document_format = Some(Some("A5".to_string()));
        changes.footer_text = Some(Some("Sur rendez-vous".to_string()));
        settings.apply(&changes, later);

        assert_eq!(settings.doctor_name, "Dr. K. Mansouri");
        assert_eq!(settings.document_format.as_deref(), Some("A5"));
        assert_eq!(settings.footer_text.as_deref(), Some("Sur rendez-vous"));
        assert_eq!(settings.primary_color.as_deref(), Some(DEFAULT_PRIMARY_COLOR));
        assert_eq!(settings.created_at, created);
        assert_eq!(settings.updated_at, later);

        changes.document_format = Some(None);
        changes.footer_text = Some(None);
        settings.apply(&changes, later);
        assert_eq!(settings.document_format.as_deref(), Some(DEFAULT_DOCUMENT_FORMAT));
        assert_eq!(settings.footer_text, None);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<NewTemplate, _> = serde_json::from_value(serde_json::json!({
            "name": "Ordonnance",
            "content": "..."
        }));
        assert!(result.is_err());
    }
}
