//! Resolution error types.
//!
//! Every variant is fatal for the call that produced it. Resolution is
//! deterministic, so retrying the same input yields the same error.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

use super::Processor;

/// Errors that abort a subscription resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No structural fingerprint matched and the caller supplied no processor.
    #[error("Unable to determine payment processor from payload")]
    UnknownProcessor,

    /// A subscription record finished resolution without a billing interval.
    #[error("Unable to determine billing interval for {processor} subscription")]
    UnknownFrequency { processor: Processor },

    /// A mapper hit a field it cannot proceed without.
    #[error("{processor} mapper fault: {reason}")]
    ProviderMapperFault { processor: Processor, reason: String },

    /// The request body is not a JSON document.
    #[error("Payload is not valid JSON: {reason}")]
    MalformedPayload { reason: String },
}

impl ResolutionError {
    pub fn unknown_frequency(processor: Processor) -> Self {
        ResolutionError::UnknownFrequency { processor }
    }

    pub fn mapper_fault(processor: Processor, reason: impl Into<String>) -> Self {
        ResolutionError::ProviderMapperFault {
            processor,
            reason: reason.into(),
        }
    }

    pub fn malformed_payload(reason: impl Into<String>) -> Self {
        ResolutionError::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolutionError::UnknownProcessor => ErrorCode::UnknownProcessor,
            ResolutionError::UnknownFrequency { .. } => ErrorCode::UnknownFrequency,
            ResolutionError::ProviderMapperFault { .. } => ErrorCode::ProviderMapperFault,
            ResolutionError::MalformedPayload { .. } => ErrorCode::InvalidFormat,
        }
    }

    /// Resolution never succeeds on retry; retry policy is the caller's.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
