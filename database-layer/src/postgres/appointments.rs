use async_trait::async_trait;
use uuid::Uuid;

use super::{BindNullable, PgClinicStore};
use crate::error::DatabaseResult;
use crate::models::{value_of, Appointment, NewAppointment, DEFAULT_APPOINTMENT_DURATION, DEFAULT_APPOINTMENT_STATUS};
use crate::repository::AppointmentRepository;

#[async_trait]
impl AppointmentRepository for PgClinicStore {
    async fn list_appointments(&self) -> DatabaseResult<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>("SELECT * FROM appointments ORDER BY date ASC")
            .fetch_all(self.pool())
            .await?;
        Ok(appointments)
    }

    async fn list_appointments_for_patient(&self, patient_id: Uuid) -> DatabaseResult<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE patient_id = $1 ORDER BY date ASC",
        )
        .bind(patient_id)
        .fetch_all(self.pool())
        .await?;
        Ok(appointments)
    }

    async fn get_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(appointment)
    }

    async fn create_appointment(&self, new: &NewAppointment) -> DatabaseResult<Appointment> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (id, patient_id, date, duration, type, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.patient_id)
        .bind(new.date)
        .bind(new.duration.unwrap_or(DEFAULT_APPOINTMENT_DURATION))
        .bind(&new.appointment_type)
        .bind(new.status.as_deref().unwrap_or(DEFAULT_APPOINTMENT_STATUS))
        .bind(value_of(&new.notes))
        .fetch_one(self.pool())
        .await?;
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &NewAppointment,
    ) -> DatabaseResult<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET
                patient_id = $1,
                date = $2,
                duration = COALESCE($3, duration),
                type = $4,
                status = COALESCE($5, status),
                notes = CASE WHEN $6 THEN $7 ELSE notes END
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(changes.patient_id)
        .bind(changes.date)
        .bind(changes.duration)
        .bind(&changes.appointment_type)
        .bind(&changes.status)
        .bind_nullable(&changes.notes)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(appointment)
    }

    async fn delete_appointment(&self, id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
