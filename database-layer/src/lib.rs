//! Persistence layer for the MedAssist clinic
//!
//! Provides the table models and their insert schemas, the repository traits
//! used by the HTTP layer, and two implementations of [`ClinicStore`]:
//!
//! - [`PgClinicStore`]: PostgreSQL through a `sqlx` pool, schema applied from
//!   the embedded migrations in `migrations/`
//! - [`MemoryClinicStore`]: process memory, for development and tests
//!
//! # Example Usage
//!
//! ```rust
//! use database_layer::{MemoryClinicStore, NewTemplate, TemplateRepository};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), database_layer::DatabaseError> {
//! let store = MemoryClinicStore::new();
//! let template = store
//!     .create_template(&NewTemplate {
//!         name: "Ordonnance standard".to_string(),
//!         template_type: "prescription".to_string(),
//!         content: "{{medications}}".to_string(),
//!         is_default: None,
//!     })
//!     .await?;
//! assert_eq!(template.is_default, Some(false));
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use connection::{DatabasePool, PoolOptions};
pub use error::{DatabaseError, DatabaseResult};
pub use memory::MemoryClinicStore;
pub use models::*;
pub use postgres::PgClinicStore;
pub use repository::*;
