//! Subscription resolution domain.
//!
//! Turns provider billing records into one canonical subscription state.
//! Every stage is a pure function that returns a new value; the
//! application layer threads them together.
//!
//! # Module Structure
//!
//! - `processor` - Processor and record type vocabulary
//! - `interval` - Billing interval and calendar extension
//! - `status` - Canonical status and caller authorization status
//! - `profile` - Caller hints and the per-call detected profile
//! - `fields` - Provider-neutral mapper output
//! - `envelope` - Webhook envelope unwrapping
//! - `detector` - Structural provider fingerprinting
//! - `classifier` - Status token tables and overrides
//! - `trial` - Trial claim, activity and expiry
//! - `expiration` - Base extension and ordered grace rules
//! - `assembler` - Canonical record assembly
//! - `state` - The canonical output record

mod assembler;
mod classifier;
mod detector;
mod envelope;
mod errors;
mod expiration;
mod fields;
mod interval;
mod policy;
mod processor;
mod profile;
mod state;
mod status;
mod trial;

pub use assembler::{assemble, resolve_billing_interval, OutputFlags};
pub use classifier::{classify, lookup, Classification};
pub use detector::{detect, fingerprint};
pub use envelope::unwrap_envelope;
pub use errors::ResolutionError;
pub use expiration::{resolve_expiration, Expiration, GraceInputs};
pub use fields::{IntermediateFields, StatusOverride, TrialWindow};
pub use interval::BillingInterval;
pub use policy::ResolutionPolicy;
pub use processor::{Processor, RecordType};
pub use profile::{DetectedProfile, ResolutionProfile};
pub use state::{
    CanonicalSubscriptionState, Details, InstantRecord, LastPaymentRecord, PaymentRecord,
    TrialRecord,
};
pub use status::{AuthorizationStatus, SubscriptionStatus};
pub use trial::{resolve_trial, TrialState};
