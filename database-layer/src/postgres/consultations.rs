use async_trait::async_trait;
use uuid::Uuid;

use super::{BindNullable, PgClinicStore};
use crate::error::DatabaseResult;
use crate::models::{value_of, Consultation, NewConsultation};
use crate::repository::ConsultationRepository;

#[async_trait]
impl ConsultationRepository for PgClinicStore {
    async fn list_consultations(&self) -> DatabaseResult<Vec<Consultation>> {
        let consultations = sqlx::query_as::<_, Consultation>(
            "SELECT * FROM consultations ORDER BY created_at DESC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(consultations)
    }

    async fn list_consultations_for_patient(&self, patient_id: Uuid) -> DatabaseResult<Vec<Consultation>> {
        let consultations = sqlx::query_as::<_, Consultation>(
            "SELECT * FROM consultations WHERE patient_id = $1 ORDER BY date DESC",
        )
        .bind(patient_id)
        .fetch_all(self.pool())
        .await?;
        Ok(consultations)
    }

    async fn get_consultation(&self, id: Uuid) -> DatabaseResult<Option<Consultation>> {
        let consultation = sqlx::query_as::<_, Consultation>("SELECT * FROM consultations WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(consultation)
    }

    async fn create_consultation(&self, new: &NewConsultation) -> DatabaseResult<Consultation> {
        let consultation = sqlx::query_as::<_, Consultation>(
            r#"
            INSERT INTO consultations (
                id, patient_id, date, chief_complaint, symptoms, diagnosis,
                treatment, notes, follow_up_date, ai_suggestions
            )
            VALUES ($1, $2, COALESCE($3, NOW()), $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.patient_id)
        .bind(new.date)
        .bind(&new.chief_complaint)
        .bind(value_of(&new.symptoms))
        .bind(value_of(&new.diagnosis))
        .bind(value_of(&new.treatment))
        .bind(value_of(&new.notes))
        .bind(value_of(&new.follow_up_date))
        .bind(value_of(&new.ai_suggestions))
        .fetch_one(self.pool())
        .await?;
        Ok(consultation)
    }

    async fn update_consultation(
        &self,
        id: Uuid,
        changes: &NewConsultation,
    ) -> DatabaseResult<Option<Consultation>> {
        let consultation = sqlx::query_as::<_, Consultation>(
            r#"
            UPDATE consultations
            SET
                patient_id = $1,
                date = COALESCE($2, date),
                chief_complaint = $3,
                symptoms = CASE WHEN $4 THEN $5 ELSE symptoms END,
                diagnosis = CASE WHEN $6 THEN $7 ELSE diagnosis END,
                treatment = CASE WHEN $8 THEN $9 ELSE treatment END,
                notes = CASE WHEN $10 THEN $11 ELSE notes END,
                follow_up_date = CASE WHEN $12 THEN $13 ELSE follow_up_date END,
                ai_suggestions = CASE WHEN $14 THEN $15 ELSE ai_suggestions END
            WHERE id = $16
            RETURNING *
            "#,
        )
        .bind(changes.patient_id)
        .bind(changes.date)
        .bind(&changes.chief_complaint)
        .bind_nullable(&changes.symptoms)
        .bind_nullable(&changes.diagnosis)
        .bind_nullable(&changes.treatment)
        .bind_nullable(&changes.notes)
        .bind_nullable(&changes.follow_up_date)
        .bind_nullable(&changes.ai_suggestions)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(consultation)
    }

    async fn delete_consultation(&self, id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM consultations WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
