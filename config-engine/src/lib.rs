//! Layered configuration for MedAssist
//!
//! Configuration is assembled from, in increasing priority:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. An optional YAML/TOML/JSON file
//! 3. Environment variables prefixed `MEDASSIST__`, with `__` as the section
//!    separator (`MEDASSIST__SERVER__PORT=9000`)
//! 4. `DATABASE_URL`, which always wins for the database URL
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .with_file("medassist.yaml")
//!     .load()?;
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod settings;

pub use error::*;
pub use loader::*;
pub use settings::*;
