//! Chargebee provider adapter.
//!
//! Implements the `ProviderMapper` port for Chargebee invoices (one-time
//! charges) and subscriptions. Outstanding dues on an active or trialing
//! subscription force suspension.

mod mapper;
mod types;

pub use mapper::ChargebeeMapper;
pub use types::{ChargebeeInvoice, ChargebeeSubscription};
