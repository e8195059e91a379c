use async_trait::async_trait;
use uuid::Uuid;

use super::{BindNullable, PgClinicStore};
use crate::error::DatabaseResult;
use crate::models::{value_of, Medication, NewMedication};
use crate::repository::MedicationRepository;

#[async_trait]
impl MedicationRepository for PgClinicStore {
    async fn list_medications(&self) -> DatabaseResult<Vec<Medication>> {
        let medications = sqlx::query_as::<_, Medication>("SELECT * FROM medications ORDER BY name ASC")
            .fetch_all(self.pool())
            .await?;
        Ok(medications)
    }

    async fn get_medication(&self, id: Uuid) -> DatabaseResult<Option<Medication>> {
        let medication = sqlx::query_as::<_, Medication>("SELECT * FROM medications WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(medication)
    }

    async fn create_medication(&self, new: &NewMedication) -> DatabaseResult<Medication> {
        let medication = sqlx::query_as::<_, Medication>(
            r#"
            INSERT INTO medications (
                id, name, generic_name, dosage, form, category, indications,
                contraindications, side_effects, interactions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(value_of(&new.generic_name))
        .bind(value_of(&new.dosage))
        .bind(value_of(&new.form))
        .bind(value_of(&new.category))
        .bind(value_of(&new.indications))
        .bind(value_of(&new.contraindications))
        .bind(value_of(&new.side_effects))
        .bind(value_of(&new.interactions))
        .fetch_one(self.pool())
        .await?;
        Ok(medication)
    }

    async fn update_medication(
        &self,
        id: Uuid,
        changes: &NewMedication,
    ) -> DatabaseResult<Option<Medication>> {
        let medication = sqlx::query_as::<_, Medication>(
            r#"
            UPDATE medications
            SET
                name = $1,
                generic_name = CASE WHEN $2 THEN $3 ELSE generic_name END,
                dosage = CASE WHEN $4 THEN $5 ELSE dosage END,
                form = CASE WHEN $6 THEN $7 ELSE form END,
                category = CASE WHEN $8 THEN $9 ELSE category END,
                indications = CASE WHEN $10 THEN $11 ELSE indications END,
                contraindications = CASE WHEN $12 THEN $13 ELSE contraindications END,
                side_effects = CASE WHEN $14 THEN $15 ELSE side_effects END,
                interactions = CASE WHEN $16 THEN $17 ELSE interactions END
            WHERE id = $18
            RETURNING *
            "#,
        )
        .bind(&changes.name)
        .bind_nullable(&changes.generic_name)
        .bind_nullable(&changes.dosage)
        .bind_nullable(&changes.form)
        .bind_nullable(&changes.category)
        .bind_nullable(&changes.indications)
        .bind_nullable(&changes.contraindications)
        .bind_nullable(&changes.side_effects)
        .bind_nullable(&changes.interactions)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(medication)
    }

    async fn delete_medication(&self, id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM medications WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
