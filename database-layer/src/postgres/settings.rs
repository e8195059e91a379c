use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::{BindNullable, PgClinicStore};
use crate::error::DatabaseResult;
use crate::models::{
    NewSettings, Settings, DEFAULT_DOCUMENT_FORMAT, DEFAULT_LANGUAGE, DEFAULT_PRIMARY_COLOR,
    DEFAULT_SECONDARY_COLOR,
};
use crate::repository::SettingsRepository;

#[async_trait]
impl SettingsRepository for PgClinicStore {
    async fn get_settings(&self) -> DatabaseResult<Option<Settings>> {
        let settings = sqlx::query_as::<_, Settings>("SELECT * FROM settings LIMIT 1")
            .fetch_optional(self.pool())
            .await?;
        Ok(settings)
    }

    async fn upsert_settings(&self, changes: &NewSettings) -> DatabaseResult<Settings> {
        // The singleton index turns a concurrent first insert into an update
        let settings = sqlx::query_as::<_, Settings>(
            r#"
            INSERT INTO settings (
                id, practice_name, doctor_name, specialty, phone, email, address,
                logo_url, watermark_url, primary_color, secondary_color,
                document_format, default_language, footer_text
            )
            VALUES (
                $1, $2, $3, $5, $7, $9, $11,
                $13, $15, COALESCE($17, $26), COALESCE($19, $27),
                COALESCE($21, $28), COALESCE($23, $29), $25
            )
            ON CONFLICT ((TRUE)) DO UPDATE
            SET
                practice_name = EXCLUDED.practice_name,
                doctor_name = EXCLUDED.doctor_name,
                specialty = CASE WHEN $4 THEN EXCLUDED.specialty ELSE settings.specialty END,
                phone = CASE WHEN $6 THEN EXCLUDED.phone ELSE settings.phone END,
                email = CASE WHEN $8 THEN EXCLUDED.email ELSE settings.email END,
                address = CASE WHEN $10 THEN EXCLUDED.address ELSE settings.address END,
                logo_url = CASE WHEN $12 THEN EXCLUDED.logo_url ELSE settings.logo_url END,
                watermark_url = CASE WHEN $14 THEN EXCLUDED.watermark_url ELSE settings.watermark_url END,
                primary_color = CASE WHEN $16 THEN EXCLUDED.primary_color ELSE settings.primary_color END,
                secondary_color = CASE WHEN $18 THEN EXCLUDED.secondary_color ELSE settings.secondary_color END,
                document_format = CASE WHEN $20 THEN EXCLUDED.document_format ELSE settings.document_format END,
                default_language = CASE WHEN $22 THEN EXCLUDED.default_language ELSE settings.default_language END,
                footer_text = CASE WHEN $24 THEN EXCLUDED.footer_text ELSE settings.footer_text END,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&changes.practice_name)
        .bind(&changes.doctor_name)
        .bind_nullable(&changes.specialty)
        .bind_nullable(&changes.phone)
        .bind_nullable(&changes.email)
        .bind_nullable(&changes.address)
        .bind_nullable(&changes.logo_url)
        .bind_nullable(&changes.watermark_url)
        .bind_nullable(&changes.primary_color)
        .bind_nullable(&changes.secondary_color)
        .bind_nullable(&changes.document_format)
        .bind_nullable(&changes.default_language)
        .bind_nullable(&changes.footer_text)
        .bind(DEFAULT_PRIMARY_COLOR)
        .bind(DEFAULT_SECONDARY_COLOR)
        .bind(DEFAULT_DOCUMENT_FORMAT)
        .bind(DEFAULT_LANGUAGE)
        .fetch_one(self.pool())
        .await?;

        info!(settings_id = %settings.id, "Practice settings saved");
        Ok(settings)
    }
}
