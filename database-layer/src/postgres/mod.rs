// PostgreSQL-backed clinic store
mod appointments;
mod consultations;
mod medications;
mod patients;
mod settings;
mod templates;

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{Encode, PgPool, Postgres, Row, Type};

use crate::connection::DatabasePool;
use crate::error::DatabaseResult;
use crate::models::{value_of, Nullable};
use crate::repository::{ClinicCounts, ClinicStore};

/// Binds a nullable field as the `$present, $value` pair read by
/// `CASE WHEN $present THEN $value ELSE column END`
trait BindNullable<'q> {
    fn bind_nullable<T>(self, field: &'q Nullable<T>) -> Self
    where
        T: Encode<'q, Postgres> + Type<Postgres> + Sync + 'q;
}

impl<'q, O> BindNullable<'q> for QueryAs<'q, Postgres, O, PgArguments> {
    fn bind_nullable<T>(self, field: &'q Nullable<T>) -> Self
    where
        T: Encode<'q, Postgres> + Type<Postgres> + Sync + 'q,
    {
        self.bind(field.is_some()).bind(value_of(field))
    }
}

/// Repositories over a shared `sqlx` pool
#[derive(Debug, Clone)]
pub struct PgClinicStore {
    db: DatabasePool,
}

impl PgClinicStore {
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &DatabasePool {
        &self.db
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

#[async_trait]
impl ClinicStore for PgClinicStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn is_healthy(&self) -> bool {
        self.db.is_healthy().await
    }

    async fn counts(&self) -> DatabaseResult<ClinicCounts> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM patients) AS patients,
                (SELECT COUNT(*) FROM consultations) AS consultations,
                (SELECT COUNT(*) FROM appointments WHERE status = 'scheduled') AS scheduled_appointments
            "#,
        )
        .fetch_one(self.pool())
        .await?;

        Ok(ClinicCounts {
            patients: row.try_get("patients")?,
            consultations: row.try_get("consultations")?,
            scheduled_appointments: row.try_get("scheduled_appointments")?,
        })
    }
}
