use async_trait::async_trait;
use uuid::Uuid;

use super::{BindNullable, PgClinicStore};
use crate::error::DatabaseResult;
use crate::models::{value_of, NewTemplate, Template};
use crate::repository::TemplateRepository;

#[async_trait]
impl TemplateRepository for PgClinicStore {
    async fn list_templates(&self) -> DatabaseResult<Vec<Template>> {
        let templates = sqlx::query_as::<_, Template>("SELECT * FROM templates ORDER BY name ASC")
            .fetch_all(self.pool())
            .await?;
        Ok(templates)
    }

    async fn get_template(&self, id: Uuid) -> DatabaseResult<Option<Template>> {
        let template = sqlx::query_as::<_, Template>("SELECT * FROM templates WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(template)
    }

    async fn create_template(&self, new: &NewTemplate) -> DatabaseResult<Template> {
        let template = sqlx::query_as::<_, Template>(
            r#"
            INSERT INTO templates (id, name, type, content, is_default)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.template_type)
        .bind(&new.content)
        .bind(value_of(&new.is_default).copied().unwrap_or(false))
        .fetch_one(self.pool())
        .await?;
        Ok(template)
    }

    async fn update_template(&self, id: Uuid, changes: &NewTemplate) -> DatabaseResult<Option<Template>> {
        let template = sqlx::query_as::<_, Template>(
            r#"
            UPDATE templates
            SET
                name = $1,
                type = $2,
                content = $3,
                is_default = CASE WHEN $4 THEN COALESCE($5, FALSE) ELSE is_default END
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.template_type)
        .bind(&changes.content)
        .bind_nullable(&changes.is_default)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(template)
    }

    async fn delete_template(&self, id: Uuid) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
