use thiserror::Error;

use crate::validation::ValidationError;

/// Custom error types for the sequential thinking server
#[derive(Error, Debug)]
pub enum ThinkingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl ThinkingError {
    /// Short label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            ThinkingError::Validation(_) => "validation",
            ThinkingError::Serialization(_) => "serialization",
            ThinkingError::Configuration(_) => "configuration",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ThinkingError>;
