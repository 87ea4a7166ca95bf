//! Subscription handlers.
//!
//! ## Queries
//! - Resolving a provider payload into canonical subscription state

mod resolve_subscription;

pub use resolve_subscription::{
    resolve_subscription, resolve_subscription_bytes, ResolveOptions, ResolveSubscriptionResult,
    SubscriptionResolver,
};
