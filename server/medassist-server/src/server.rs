use anyhow::{Context, Result};
use clinical_assistant::{AssistantConfig, ClinicalAssistant, KeywordAssistant};
use config_engine::{AppConfig, StorageBackend};
use database_layer::{ClinicStore, DatabasePool, MemoryClinicStore, PgClinicStore, PoolOptions};
use logger_redacted::{PiiRedactor, RedactionConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Main MedAssist server state, cloned into every handler
#[derive(Clone)]
pub struct MedAssistServer {
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// Clinic records
    pub store: Arc<dyn ClinicStore>,
    /// Consultation suggestion engine
    pub assistant: Arc<dyn ClinicalAssistant>,
    /// Scrubs free text before it is logged
    pub redactor: Arc<PiiRedactor>,
    started_at: Instant,
}

impl MedAssistServer {
    /// Create a server with the store and assistant selected by `config`
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store: Arc<dyn ClinicStore> = match config.database.backend {
            StorageBackend::Postgres => {
                let options = PoolOptions {
                    max_connections: config.database.max_connections,
                    acquire_timeout: Duration::from_secs(config.database.acquire_timeout_secs),
                };
                let db = DatabasePool::connect(&config.database.url, options)
                    .await
                    .context("Failed to connect to PostgreSQL")?;
                if config.database.run_migrations {
                    db.migrate().await.context("Failed to apply migrations")?;
                }
                Arc::new(PgClinicStore::new(db))
            }
            StorageBackend::Memory => {
                info!("Using in-memory store, data will not survive a restart");
                Arc::new(MemoryClinicStore::new())
            }
        };

        let assistant_settings = &config.assistant;
        let assistant = Arc::new(KeywordAssistant::new(AssistantConfig::from_millis(
            assistant_settings.diagnosis_delay_ms,
            assistant_settings.summary_delay_ms,
            assistant_settings.medication_delay_ms,
        )));

        Ok(Self::with_components(config, store, assistant))
    }

    /// Assemble a server from already-built components
    pub fn with_components(
        config: AppConfig,
        store: Arc<dyn ClinicStore>,
        assistant: Arc<dyn ClinicalAssistant>,
    ) -> Self {
        let redactor = PiiRedactor::new(RedactionConfig::from(&config.logging));
        Self {
            config: Arc::new(config),
            store,
            assistant,
            redactor: Arc::new(redactor),
            started_at: Instant::now(),
        }
    }

    /// In-memory store and an assistant without artificial latency
    pub fn in_memory(config: AppConfig) -> Self {
        Self::with_components(
            config,
            Arc::new(MemoryClinicStore::new()),
            Arc::new(KeywordAssistant::new(AssistantConfig::instant())),
        )
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
