use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use tracing::{debug, info};

use crate::error::Result;
use crate::settings::AppConfig;

/// Environment prefix for overrides, e.g. `MEDASSIST__SERVER__PORT`
pub const ENV_PREFIX: &str = "MEDASSIST";

/// Builder that layers defaults, files and environment into an [`AppConfig`]
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    inline: Option<(String, FileFormat)>,
    use_env: bool,
    load_dotenv: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            inline: None,
            use_env: true,
            load_dotenv: true,
        }
    }

    /// Read a configuration file. Format follows the extension.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Layer configuration from an in-memory document
    pub fn with_str(mut self, contents: impl Into<String>, format: FileFormat) -> Self {
        self.inline = Some((contents.into(), format));
        self
    }

    /// Skip environment variables and `.env` files
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self.load_dotenv = false;
        self
    }

    pub fn load(self) -> Result<AppConfig> {
        if self.load_dotenv {
            if let Ok(path) = dotenvy::dotenv() {
                debug!(path = %path.display(), "Loaded .env file");
            }
        }

        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = &self.file {
            info!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        if let Some((contents, format)) = &self.inline {
            builder = builder.add_source(File::from_str(contents, *format));
        }

        if self.use_env {
            builder = builder
                .add_source(
                    Environment::with_prefix(ENV_PREFIX)
                        .separator("__")
                        .try_parsing(true),
                )
                .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            backend = ?config.database.backend,
            port = config.server.port,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StorageBackend;

    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigLoader::new().without_env().load().unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert_eq!(config.assistant.diagnosis_delay_ms, 500);
        assert_eq!(config.assistant.summary_delay_ms, 300);
        assert_eq!(config.assistant.medication_delay_ms, 400);
        assert!(config.logging.redaction_enabled);
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let yaml = r#"
server:
  port: 9100
database:
  backend: memory
assistant:
  diagnosis_delay_ms: 0
logging:
  json: true
"#;
        let config = ConfigLoader::new()
            .without_env()
            .with_str(yaml, FileFormat::Yaml)
            .load()
            .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.assistant.diagnosis_delay_ms, 0);
        assert_eq!(config.assistant.summary_delay_ms, 300);
        assert!(config.logging.json);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ConfigLoader::new()
            .without_env()
            .with_str("server:\n  port: 0\n", FileFormat::Yaml)
            .load();
        assert!(matches!(result, Err(crate::ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_memory_backend_does_not_need_url() {
        let yaml = "database:\n  backend: memory\n  url: \"\"\n";
        let config = ConfigLoader::new()
            .without_env()
            .with_str(yaml, FileFormat::Yaml)
            .load()
            .unwrap();
        assert!(config.database.url.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ConfigLoader::new()
            .without_env()
            .with_file("/nonexistent/medassist.yaml")
            .load();
        assert!(result.is_err());
    }
}
