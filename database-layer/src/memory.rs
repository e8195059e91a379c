// In-memory clinic store for development and tests
//
// Mirrors the PostgreSQL behavior the HTTP layer relies on: list orderings,
// insert defaults, absent-versus-null updates and foreign key checks on patients.
// Name orderings fold case to approximate a linguistic database collation;
// a database created with the C collation sorts bytewise instead.
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::*;
use crate::repository::*;

#[derive(Debug, Default)]
struct Tables {
    patients: Vec<Patient>,
    consultations: Vec<Consultation>,
    appointments: Vec<Appointment>,
    medications: Vec<Medication>,
    templates: Vec<Template>,
    settings: Option<Settings>,
}

impl Tables {
    fn require_patient(&self, patient_id: Uuid) -> DatabaseResult<()> {
        if self.patients.iter().any(|p| p.id == patient_id) {
            Ok(())
        } else {
            Err(DatabaseError::ForeignKeyViolation(format!(
                "patient {} does not exist",
                patient_id
            )))
        }
    }
}

/// Store backed by process memory; contents are lost on shutdown
#[derive(Debug, Clone, Default)]
pub struct MemoryClinicStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Ascending by lowercased name
fn by_name<T: Clone>(rows: &[T], name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by_cached_key(|row| name(row).to_lowercase());
    sorted
}

/// Newest first; rows with equal timestamps keep most-recent-insert first
fn newest_first<T: Clone>(rows: &[T], key: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut sorted: Vec<T> = rows.iter().rev().cloned().collect();
    sorted.sort_by_key(|row| std::cmp::Reverse(key(row)));
    sorted
}

#[async_trait]
impl PatientRepository for MemoryClinicStore {
    async fn list_patients(&self) -> DatabaseResult<Vec<Patient>> {
        Ok(newest_first(&self.tables.read().patients, |p| p.created_at))
    }

    async fn get_patient(&self, id: Uuid) -> DatabaseResult<Option<Patient>> {
        Ok(self.tables.read().patients.iter().find(|p| p.id == id).cloned())
    }

    async fn create_patient(&self, new: &NewPatient) -> DatabaseResult<Patient> {
        let patient = Patient::from_new(Uuid::new_v4(), Utc::now(), new);
        self.tables.write().patients.push(patient.clone());
        Ok(patient)
    }

    async fn update_patient(&self, id: Uuid, changes: &NewPatient) -> DatabaseResult<Option<Patient>> {
        let mut tables = self.tables.write();
        Ok(tables.patients.iter_mut().find(|p| p.id == id).map(|patient| {
            patient.apply(changes);
            patient.clone()
        }))
    }

    async fn delete_patient(&self, id: Uuid) -> DatabaseResult<()> {
        let mut tables = self.tables.write();
        let referenced = tables.consultations.iter().any(|c| c.patient_id == id)
            || tables.appointments.iter().any(|a| a.patient_id == id);
        if referenced {
            return Err(DatabaseError::ForeignKeyViolation(format!(
                "patient {} is still referenced",
                id
            )));
        }
        tables.patients.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl ConsultationRepository for MemoryClinicStore {
    async fn list_consultations(&self) -> DatabaseResult<Vec<Consultation>> {
        Ok(newest_first(&self.tables.read().consultations, |c| c.created_at))
    }

    async fn list_consultations_for_patient(&self, patient_id: Uuid) -> DatabaseResult<Vec<Consultation>> {
        let tables = self.tables.read();
        let rows: Vec<Consultation> = tables
            .consultations
            .iter()
            .filter(|c| c.patient_id == patient_id)
            .cloned()
            .collect();
        Ok(newest_first(&rows, |c| c.date))
    }

    async fn get_consultation(&self, id: Uuid) -> DatabaseResult<Option<Consultation>> {
        Ok(self.tables.read().consultations.iter().find(|c| c.id == id).cloned())
    }

    async fn create_consultation(&self, new: &NewConsultation) -> DatabaseResult<Consultation> {
        let mut tables = self.tables.write();
        tables.require_patient(new.patient_id)?;
        let consultation = Consultation::from_new(Uuid::new_v4(), Utc::now(), new);
        tables.consultations.push(consultation.clone());
        Ok(consultation)
    }

    async fn update_consultation(
        &self,
        id: Uuid,
        changes: &NewConsultation,
    ) -> DatabaseResult<Option<Consultation>> {
        let mut tables = self.tables.write();
        if !tables.consultations.iter().any(|c| c.id == id) {
            return Ok(None);
        }
        tables.require_patient(changes.patient_id)?;
        Ok(tables.consultations.iter_mut().find(|c| c.id == id).map(|consultation| {
            consultation.apply(changes);
            consultation.clone()
        }))
    }

    async fn delete_consultation(&self, id: Uuid) -> DatabaseResult<()> {
        self.tables.write().consultations.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl AppointmentRepository for MemoryClinicStore {
    async fn list_appointments(&self) -> DatabaseResult<Vec<Appointment>> {
        let mut appointments = self.tables.read().appointments.clone();
        appointments.sort_by_key(|a| a.date);
        Ok(appointments)
    }

    async fn list_appointments_for_patient(&self, patient_id: Uuid) -> DatabaseResult<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self
            .tables
            .read()
            .appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.date);
        Ok(appointments)
    }

    async fn get_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>> {
        Ok(self.tables.read().appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn create_appointment(&self, new: &NewAppointment) -> DatabaseResult<Appointment> {
        let mut tables = self.tables.write();
        tables.require_patient(new.patient_id)?;
        let appointment = Appointment::from_new(Uuid::new_v4(), Utc::now(), new);
        tables.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &NewAppointment,
    ) -> DatabaseResult<Option<Appointment>> {
        let mut tables = self.tables.write();
        if !tables.appointments.iter().any(|a| a.id == id) {
            return Ok(None);
        }
        tables.require_patient(changes.patient_id)?;
        Ok(tables.appointments.iter_mut().find(|a| a.id == id).map(|appointment| {
            appointment.apply(changes);
            appointment.clone()
        }))
    }

    async fn delete_appointment(&self, id: Uuid) -> DatabaseResult<()> {
        self.tables.write().appointments.retain(|a| a.id != id);
        Ok(())
    }
}

#[async_trait]
impl MedicationRepository for MemoryClinicStore {
    async fn list_medications(&self) -> DatabaseResult<Vec<Medication>> {
        Ok(by_name(&self.tables.read().medications, |m| m.name.as_str()))
    }

    async fn get_medication(&self, id: Uuid) -> DatabaseResult<Option<Medication>> {
        Ok(self.tables.read().medications.iter().find(|m| m.id == id).cloned())
    }

    async fn create_medication(&self, new: &NewMedication) -> DatabaseResult<Medication> {
        let medication = Medication::from_new(Uuid::new_v4(), Utc::now(), new);
        self.tables.write().medications.push(medication.clone());
        Ok(medication)
    }

    async fn update_medication(
        &self,
        id: Uuid,
        changes: &NewMedication,
    ) -> DatabaseResult<Option<Medication>> {
        let mut tables = self.tables.write();
        Ok(tables.medications.iter_mut().find(|m| m.id == id).map(|medication| {
            medication.apply(changes);
            medication.clone()
        }))
    }

    async fn delete_medication(&self, id: Uuid) -> DatabaseResult<()> {
        self.tables.write().medications.retain(|m| m.id != id);
        Ok(())
    }
}

#[async_trait]
impl TemplateRepository for MemoryClinicStore {
    async fn list_templates(&self) -> DatabaseResult<Vec<Template>> {
        Ok(by_name(&self.tables.read().templates, |t| t.name.as_str()))
    }

    async fn get_template(&self, id: Uuid) -> DatabaseResult<Option<Template>> {
        Ok(self.tables.read().templates.iter().find(|t| t.id == id).cloned())
    }

    async fn create_template(&self, new: &NewTemplate) -> DatabaseResult<Template> {
        let template = Template::from_new(Uuid::new_v4(), Utc::now(), new);
        self.tables.write().templates.push(template.clone());
        Ok(template)
    }

    async fn update_template(&self, id: Uuid, changes: &NewTemplate) -> DatabaseResult<Option<Template>> {
        let mut tables = self.tables.write();
        Ok(tables.templates.iter_mut().find(|t| t.id == id).map(|template| {
            template.apply(changes);
            template.clone()
        }))
    }

    async fn delete_template(&self, id: Uuid) -> DatabaseResult<()> {
        self.tables.write().templates.retain(|t| t.id != id);
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for MemoryClinicStore {
    async fn get_settings(&self) -> DatabaseResult<Option<Settings>> {
        Ok(self.tables.read().settings.clone())
    }

    async fn upsert_settings(&self, changes: &NewSettings) -> DatabaseResult<Settings> {
        let mut tables = self.tables.write();
        let now = Utc::now();
        let settings = match tables.settings.as_mut() {
            Some(existing) => {
                existing.apply(changes, now);
                existing.clone()
            }
            None => Settings::from_new(Uuid::new_v4(), now, changes),
        };
        tables.settings = Some(settings.clone());
        Ok(settings)
    }
}

#[async_trait]
impl ClinicStore for MemoryClinicStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn is_healthy(&self) -> bool {
        true
    }

    async fn counts(&self) -> DatabaseResult<ClinicCounts> {
        let tables = self.tables.read();
        Ok(ClinicCounts {
            patients: tables.patients.len() as i64,
            consultations: tables.consultations.len() as i64,
            scheduled_appointments: tables
                .appointments
                .iter()
                .filter(|a| a.status == DEFAULT_APPOINTMENT_STATUS)
                .count() as i64,
        })
    }
}
