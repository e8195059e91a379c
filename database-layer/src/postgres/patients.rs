use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{BindNullable, PgClinicStore};
use crate::error::DatabaseResult;
use crate::models::{value_of, NewPatient, Patient};
use crate::repository::PatientRepository;

#[async_trait]
impl PatientRepository for PgClinicStore {
    async fn list_patients(&self) -> DatabaseResult<Vec<Patient>> {
        let patients = sqlx::query_as::<_, Patient>(
            "SELECT * FROM patients ORDER BY created_at DESC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(patients)
    }

    async fn get_patient(&self, id: Uuid) -> DatabaseResult<Option<Patient>> {
        let patient = sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(patient)
    }

    async fn create_patient(&self, new: &NewPatient) -> DatabaseResult<Patient> {
        let patient = sqlx::query_as::<_, Patient>(
            r#"
            INSERT INTO patients (
                id, first_name, last_name, date_of_birth, gender, phone, email,
                address, medical_history, allergies, current_medications
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.date_of_birth)
        .bind(&new.gender)
        .bind(value_of(&new.phone))
        .bind(value_of(&new.email))
        .bind(value_of(&new.address))
        .bind(value_of(&new.medical_history))
        .bind(value_of(&new.allergies))
        .bind(value_of(&new.current_medications))
        .fetch_one(self.pool())
        .await?;

        debug!(patient_id = %patient.id, "Patient inserted");
        Ok(patient)
    }

    async fn update_patient(&self, id: Uuid, changes: &NewPatient) -> DatabaseResult<Option<Patient>> {
        let patient = sqlx::query_as::<_, Patient>(
            r#"
            UPDATE patients
            SET
                first_name = $1,
                last_name = $2,
                date_of_birth = $3,
                gender = $4,
                phone = CASE WHEN $5 THEN $6 ELSE phone END,
                email = CASE WHEN $7 THEN $8 ELSE email END,
                address = CASE WHEN $9 THEN $10 ELSE address END,
                medical_history = CASE WHEN $11 THEN $12 ELSE medical_history END,
                allergies = CASE WHEN $13 THEN $14 ELSE allergies END,
                current_medications = CASE WHEN $15 THEN $16 ELSE current_medications END
            WHERE id = $17
            RETURNING *
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(changes.date_of_birth)
        .bind(&changes.gender)
        .bind_nullable(&changes.phone)
        .bind_nullable(&changes.email)
        .bind_nullable(&changes.address)
        .bind_nullable(&changes.medical_history)
        .bind_nullable(&changes.allergies)
        .bind_nullable(&changes.current_medications)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(patient)
    }

    async fn delete_patient(&self, id: Uuid) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        debug!(patient_id = %id, rows = result.rows_affected(), "Patient delete executed");
        Ok(())
    }
}
