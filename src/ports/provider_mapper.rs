//! Provider mapper port.
//!
//! Each supported payment processor has one mapper that turns its native
//! payload into [`IntermediateFields`]. Mappers are pure and deterministic.
//!
//! # Design
//!
//! - **Strategy dispatch**: the resolver picks a mapper by [`Processor`]
//! - **Lenient on optional data**: missing optional fields default
//! - **Strict on identity**: a payload without a status token is a fault

use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{
    DetectedProfile, IntermediateFields, Processor, RecordType, ResolutionError,
};

/// Per-call context handed to a mapper.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    pub profile: &'a DetectedProfile,

    /// Reference instant for rules that depend on elapsed time.
    pub today: Timestamp,
}

impl<'a> MappingContext<'a> {
    pub fn new(profile: &'a DetectedProfile, today: Timestamp) -> Self {
        Self { profile, today }
    }

    pub fn record_type(&self) -> RecordType {
        self.profile.record_type
    }
}

/// Port for provider-specific field extraction.
pub trait ProviderMapper: Send + Sync {
    /// The processor whose payloads this mapper understands.
    fn processor(&self) -> Processor;

    /// Extracts provider-neutral fields from a native payload.
    ///
    /// # Errors
    ///
    /// Returns `ProviderMapperFault` when the payload cannot be decoded or
    /// lacks a field the mapper cannot proceed without.
    fn map(
        &self,
        ctx: &MappingContext<'_>,
        payload: &Value,
    ) -> Result<IntermediateFields, ResolutionError>;
}

/// Decodes a payload into a provider's typed shape.
///
/// Decode failures become `ProviderMapperFault` for `processor`.
pub fn decode<T>(processor: Processor, payload: &Value) -> Result<T, ResolutionError>
where
    T: serde::de::DeserializeOwned,
{
    T::deserialize(payload).map_err(|e| {
        tracing::warn!(processor = %processor, error = %e, "Provider payload failed to decode");
        ResolutionError::mapper_fault(processor, e.to_string())
    })
}
