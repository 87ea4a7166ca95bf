//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, error codes)
//! - `subscription` - Provider detection, classification, trial and grace rules
//!   and the canonical subscription state

pub mod foundation;
pub mod subscription;
