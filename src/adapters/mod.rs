//! Adapters - Implementations of port interfaces.
//!
//! One adapter per supported payment processor, each implementing the
//! `ProviderMapper` port:
//! - `paypal` - Orders v2 and Billing v1 subscriptions
//! - `chargebee` - Invoices and subscriptions
//! - `stripe` - Charges and subscriptions
//! - `coinbase` - Commerce charges

pub mod chargebee;
pub mod coinbase;
pub mod paypal;
pub mod stripe;

use crate::domain::subscription::Processor;
use crate::ports::ProviderMapper;

pub use chargebee::ChargebeeMapper;
pub use coinbase::CoinbaseMapper;
pub use paypal::PaypalMapper;
pub use stripe::StripeMapper;

/// Returns the mapper for a processor.
pub fn mapper_for(processor: Processor) -> &'static dyn ProviderMapper {
    match processor {
        Processor::Paypal => &PaypalMapper,
        Processor::Chargebee => &ChargebeeMapper,
        Processor::Stripe => &StripeMapper,
        Processor::Coinbase => &CoinbaseMapper,
    }
}
