//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

impl ConfigError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::LoadError(_) => ErrorCode::ConfigurationError,
            ConfigError::ValidationFailed(_) => ErrorCode::ValidationFailed,
        }
    }
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Trial window must be between 1 and 365 days, got {0}")]
    InvalidTrialWindow(i64),

    #[error("Active grace window must be between 1 and 60 months in total")]
    InvalidGraceWindow,

    #[error("Redaction token cannot be empty")]
    EmptyRedactionToken,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
