//! PayPal provider adapter.
//!
//! Implements the `ProviderMapper` port for PayPal Orders v2 (one-time
//! purchases) and Billing v1 subscriptions.
//!
//! # Trial semantics
//!
//! A subscription with no completed REGULAR cycle and a free TRIAL tier is
//! trialing until the first nonzero payment, even though PayPal keeps
//! reporting the trial. Overrunning the declared trial length while still
//! unpaid forces suspension.

mod mapper;
mod types;

pub use mapper::PaypalMapper;
pub use types::{PaypalOrder, PaypalSubscription};
