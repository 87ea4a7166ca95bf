//! Subscription Resolver - Canonical subscription state from billing providers
//!
//! This crate converts PayPal, Chargebee, Stripe and Coinbase Commerce orders
//! and subscriptions into one provider-agnostic subscription state used to
//! gate feature access.
//!
//! ```no_run
//! use serde_json::json;
//! use subscription_resolver::application::{resolve_subscription, ResolveOptions};
//! use subscription_resolver::domain::subscription::ResolutionProfile;
//!
//! let payload = json!({"id": "sub_1", "object": "subscription", "status": "active"});
//! let state = resolve_subscription(&payload, &ResolutionProfile::default(), &ResolveOptions::default());
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
