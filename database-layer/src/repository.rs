// Repository traits shared by the PostgreSQL and in-memory stores
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DatabaseResult;
use crate::models::*;

/// Row counts backing the dashboard statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClinicCounts {
    pub patients: i64,
    pub consultations: i64,
    pub scheduled_appointments: i64,
}

#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Newest first
    async fn list_patients(&self) -> DatabaseResult<Vec<Patient>>;
    async fn get_patient(&self, id: Uuid) -> DatabaseResult<Option<Patient>>;
    async fn create_patient(&self, new: &NewPatient) -> DatabaseResult<Patient>;
    async fn update_patient(&self, id: Uuid, changes: &NewPatient) -> DatabaseResult<Option<Patient>>;
    /// Fails with a foreign key violation while consultations or appointments
    /// still reference the patient
    async fn delete_patient(&self, id: Uuid) -> DatabaseResult<()>;
}

#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    /// Newest first
    async fn list_consultations(&self) -> DatabaseResult<Vec<Consultation>>;
    /// Newest visit date first
    async fn list_consultations_for_patient(&self, patient_id: Uuid) -> DatabaseResult<Vec<Consultation>>;
    async fn get_consultation(&self, id: Uuid) -> DatabaseResult<Option<Consultation>>;
    async fn create_consultation(&self, new: &NewConsultation) -> DatabaseResult<Consultation>;
    async fn update_consultation(
        &self,
        id: Uuid,
        changes: &NewConsultation,
    ) -> DatabaseResult<Option<Consultation>>;
    async fn delete_consultation(&self, id: Uuid) -> DatabaseResult<()>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Earliest first
    async fn list_appointments(&self) -> DatabaseResult<Vec<Appointment>>;
    /// Earliest first
    async fn list_appointments_for_patient(&self, patient_id: Uuid) -> DatabaseResult<Vec<Appointment>>;
    async fn get_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>>;
    async fn create_appointment(&self, new: &NewAppointment) -> DatabaseResult<Appointment>;
    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &NewAppointment,
    ) -> DatabaseResult<Option<Appointment>>;
    async fn delete_appointment(&self, id: Uuid) -> DatabaseResult<()>;
}

#[async_trait]
pub trait MedicationRepository: Send + Sync {
    /// Alphabetical by name
    async fn list_medications(&self) -> DatabaseResult<Vec<Medication>>;
    async fn get_medication(&self, id: Uuid) -> DatabaseResult<Option<Medication>>;
    async fn create_medication(&self, new: &NewMedication) -> DatabaseResult<Medication>;
    async fn update_medication(
        &self,
        id: Uuid,
        changes: &NewMedication,
    ) -> DatabaseResult<Option<Medication>>;
    async fn delete_medication(&self, id: Uuid) -> DatabaseResult<()>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Alphabetical by name
    async fn list_templates(&self) -> DatabaseResult<Vec<Template>>;
    async fn get_template(&self, id: Uuid) -> DatabaseResult<Option<Template>>;
    async fn create_template(&self, new: &NewTemplate) -> DatabaseResult<Template>;
    async fn update_template(&self, id: Uuid, changes: &NewTemplate) -> DatabaseResult<Option<Template>>;
    async fn delete_template(&self, id: Uuid) -> DatabaseResult<()>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_settings(&self) -> DatabaseResult<Option<Settings>>;
    /// Creates the settings row on first call, updates it afterwards
    async fn upsert_settings(&self, changes: &NewSettings) -> DatabaseResult<Settings>;
}

/// Everything the HTTP layer needs from storage
#[async_trait]
pub trait ClinicStore:
    PatientRepository
    + ConsultationRepository
    + AppointmentRepository
    + MedicationRepository
    + TemplateRepository
    + SettingsRepository
{
    /// Short backend label for health reporting
    fn backend_name(&self) -> &'static str;

    async fn is_healthy(&self) -> bool;

    async fn counts(&self) -> DatabaseResult<ClinicCounts>;
}
