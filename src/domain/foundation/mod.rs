//! Foundation module - Shared domain primitives.
//!
//! Contains the timestamp value object and the error vocabulary
//! shared by every stage of subscription resolution.

mod errors;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use timestamp::{lenient_amount, lenient_timestamp, Timestamp};
