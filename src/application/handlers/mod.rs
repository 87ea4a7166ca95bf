//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod subscription;

pub use subscription::{
    resolve_subscription, resolve_subscription_bytes, ResolveOptions, ResolveSubscriptionResult,
    SubscriptionResolver,
};
