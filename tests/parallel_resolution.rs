//! Integration tests for resolving from many tasks at once.
//!
//! The resolver holds no mutable state, so one shared instance must give
//! every task the same answer it gives a single caller.

use std::sync::Arc;

use serde_json::json;

use subscription_resolver::application::{ResolveOptions, SubscriptionResolver};
use subscription_resolver::domain::foundation::Timestamp;
use subscription_resolver::domain::subscription::{ResolutionProfile, SubscriptionStatus};

fn stripe_subscription(n: i64) -> serde_json::Value {
    let start = 1_680_307_200 + n * 86_400;
    let status = if n % 3 == 0 { "past_due" } else { "active" };
    json!({
        "id": format!("sub_{n}"),
        "object": "subscription",
        "status": status,
        "start_date": start,
        "current_period_start": start,
        "items": {"data": [{"price": {"unit_amount": 1200, "recurring": {"interval": "month"}}}]}
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_resolver_matches_sequential_results() {
    let resolver = Arc::new(SubscriptionResolver::default());
    let options = ResolveOptions::at(Timestamp::from_unix_secs(1_690_000_000));

    let expected: Vec<_> = (0..32)
        .map(|n| {
            resolver
                .resolve(&stripe_subscription(n), &ResolutionProfile::default(), &options)
                .unwrap()
        })
        .collect();

    let handles: Vec<_> = (0..32)
        .map(|n| {
            let resolver = Arc::clone(&resolver);
            tokio::task::spawn_blocking(move || {
                resolver
                    .resolve(&stripe_subscription(n), &ResolutionProfile::default(), &options)
                    .unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let state = handle.await.unwrap();
        assert_eq!(state, expected[n]);
        assert_eq!(state.external_resource_id, format!("sub_{n}"));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn suspended_records_stay_suspended_under_contention() {
    let resolver = Arc::new(SubscriptionResolver::default());
    let options = ResolveOptions::at(Timestamp::from_unix_secs(1_690_000_000));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move {
                resolver
                    .resolve(&stripe_subscription(i * 3), &ResolutionProfile::default(), &options)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let state = handle.await.unwrap();
        assert_eq!(state.status, SubscriptionStatus::Suspended);
        assert!(state.expires.is_epoch());
    }
}
