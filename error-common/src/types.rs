use thiserror::Error;

/// Process-level error for MedAssist binaries
#[derive(Error, Debug)]
pub enum MedAssistError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MedAssistError {
    /// Short machine-readable category, used as a structured log field
    pub fn category(&self) -> &'static str {
        match self {
            MedAssistError::NetworkError(_) => "network",
            MedAssistError::ServerError(_) => "server",
            MedAssistError::InternalError(_) => "internal",
            MedAssistError::ConfigError(_) => "config",
            MedAssistError::Other(_) => "other",
        }
    }
}

/// Result type alias for MedAssist operations
pub type Result<T> = std::result::Result<T, MedAssistError>;

/// Logs an error with its category before it leaves the process
pub fn log_error(context: &str, error: &MedAssistError) {
    tracing::error!(
        context = context,
        category = error.category(),
        error = %error,
        "MedAssist error occurred"
    );
}
