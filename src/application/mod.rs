//! Application layer - Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    resolve_subscription, resolve_subscription_bytes, ResolveOptions, ResolveSubscriptionResult,
    SubscriptionResolver,
};
