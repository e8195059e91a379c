//! Structured logging with PII redaction for MedAssist
//!
//! Two pieces live here:
//!
//! - [`init`] installs the global `tracing` subscriber: coloured,
//!   human-readable output for development or JSON lines for production,
//!   filtered by `RUST_LOG` or the configured level.
//! - [`PiiRedactor`] scrubs free text (symptom descriptions, notes) before it
//!   reaches a log line. Emails, phone numbers and dates are replaced either by
//!   a mask or by a short SHA-256 token so repeated values can still be
//!   correlated across log lines.
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{PiiRedactor, RedactionConfig};
//!
//! let redactor = PiiRedactor::new(RedactionConfig {
//!     hash_for_correlation: false,
//!     ..Default::default()
//! });
//! let line = redactor.redact("Patient joignable au 0555 12 34 56");
//! assert_eq!(line, "Patient joignable au ** ** ** **");
//! ```

pub mod config;
pub mod redactor;
pub mod subscriber;

pub use config::*;
pub use redactor::*;
pub use subscriber::*;
