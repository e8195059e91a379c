//! Clinical assistant for consultation documentation
//!
//! Offers three suggestions while a consultation is being written up:
//!
//! - candidate diagnoses for the recorded symptoms
//! - a short summary of free-text notes
//! - first-line medications for a diagnosis
//!
//! The bundled [`KeywordAssistant`] matches French and English keywords
//! against fixed tables and answers after a short, configurable delay. It
//! never calls out to a model. Other engines plug in through the
//! [`ClinicalAssistant`] trait.
//!
//! # Example Usage
//!
//! ```rust
//! use clinical_assistant::{AssistantConfig, ClinicalAssistant, KeywordAssistant};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), clinical_assistant::AssistantError> {
//! let assistant = KeywordAssistant::new(AssistantConfig::instant());
//!
//! let diagnoses = assistant.suggest_diagnosis("Fièvre depuis 3 jours").await?;
//! assert_eq!(diagnoses[0], "Infection virale");
//!
//! let summary = assistant.summarize("Patient vu ce jour. Toux sèche. Pas de fièvre.").await?;
//! assert_eq!(summary, "Patient vu ce jour. Toux sèche.");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod vocabulary;

pub use config::*;
pub use error::*;
pub use service::*;
