//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Provider Ports
//!
//! - `ProviderMapper` - Extracts provider-neutral fields from a native payload

mod provider_mapper;

pub use provider_mapper::{decode, MappingContext, ProviderMapper};
