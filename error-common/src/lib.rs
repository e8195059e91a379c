//! Common error handling utilities for MedAssist
//!
//! This crate holds the error type returned by the MedAssist binaries and the
//! stable error codes attached to API error responses. Library crates keep
//! their own `thiserror` enums (`DatabaseError`, `AssistantError`,
//! `ConfigError`) and convert into [`MedAssistError`] at the process edge.
//!
//! # Example
//!
//! ```rust
//! use error_common::{MedAssistError, Result};
//!
//! fn bind_port(port: u16) -> Result<u16> {
//!     if port == 0 {
//!         return Err(MedAssistError::ConfigError("port must be non-zero".into()));
//!     }
//!     Ok(port)
//! }
//!
//! assert!(bind_port(0).is_err());
//! assert_eq!(bind_port(8080).unwrap(), 8080);
//! ```

pub mod types;
pub mod codes;

pub use types::*;
pub use codes::*;
