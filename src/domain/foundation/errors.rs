//! Error types shared across the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidFormat,

    // Resolution errors
    UnknownProcessor,
    UnknownFrequency,
    ProviderMapperFault,

    // Infrastructure errors
    ConfigurationError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::UnknownProcessor => "UNKNOWN_PROCESSOR",
            ErrorCode::UnknownFrequency => "UNKNOWN_FREQUENCY",
            ErrorCode::ProviderMapperFault => "PROVIDER_MAPPER_FAULT",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("processor");
        assert_eq!(format!("{}", err), "Field 'processor' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("processor", "unsupported value 'square'");
        assert_eq!(
            format!("{}", err),
            "Field 'processor' has invalid format: unsupported value 'square'"
        );
    }

    #[test]
    fn error_codes_render_screaming_snake_case() {
        assert_eq!(ErrorCode::UnknownProcessor.to_string(), "UNKNOWN_PROCESSOR");
        assert_eq!(ErrorCode::UnknownFrequency.to_string(), "UNKNOWN_FREQUENCY");
        assert_eq!(
            ErrorCode::ProviderMapperFault.to_string(),
            "PROVIDER_MAPPER_FAULT"
        );
    }
}
