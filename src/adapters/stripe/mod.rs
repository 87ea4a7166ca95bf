//! Stripe provider adapter.
//!
//! Implements the `ProviderMapper` port for Stripe charges (one-time
//! purchases) and subscriptions, across API versions:
//! - Period fields are read at the top level or on the first item
//! - `latest_invoice` may be an id or an expanded invoice
//! - Money is reported in cents

mod mapper;
mod types;

pub use mapper::StripeMapper;
pub use types::{StripeCharge, StripeInvoice, StripeSubscription};
