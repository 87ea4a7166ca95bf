//! Provider detection by structural fingerprint.
//!
//! Key names overlap across providers, so fingerprints are checked in a
//! fixed priority order and the first match wins.

use serde_json::Value;

use super::{DetectedProfile, Processor, RecordType, ResolutionError, ResolutionProfile};

/// Infers processor and record type from a payload's shape.
///
/// Coinbase charges look the same for orders and subscriptions, so the
/// record type is `None` for them.
pub fn fingerprint(payload: &Value) -> Option<(Processor, Option<RecordType>)> {
    let has = |key: &str| payload.get(key).is_some();
    let object = payload.get("object").and_then(Value::as_str);

    if has("purchase_units") {
        return Some((Processor::Paypal, Some(RecordType::Order)));
    }
    if has("create_time") {
        return Some((Processor::Paypal, Some(RecordType::Subscription)));
    }
    if has("line_items") {
        return Some((Processor::Chargebee, Some(RecordType::Order)));
    }
    if has("billing_period_unit") {
        return Some((Processor::Chargebee, Some(RecordType::Subscription)));
    }
    if object == Some("charge") {
        return Some((Processor::Stripe, Some(RecordType::Order)));
    }
    if object == Some("subscription") {
        return Some((Processor::Stripe, Some(RecordType::Subscription)));
    }
    if has("addresses") {
        return Some((Processor::Coinbase, None));
    }
    None
}

/// Completes the caller's profile for one resolution call.
///
/// Caller-supplied values always win over the fingerprint. A fingerprinted
/// record type is only used when it belongs to the same processor.
pub fn detect(
    profile: &ResolutionProfile,
    payload: &Value,
) -> Result<DetectedProfile, ResolutionError> {
    let fingerprinted = fingerprint(payload);

    let processor = match (profile.processor, fingerprinted) {
        (Some(processor), _) => processor,
        (None, Some((processor, _))) => processor,
        (None, None) => {
            tracing::warn!("No processor fingerprint matched payload");
            return Err(ResolutionError::UnknownProcessor);
        }
    };

    let inferred_type = fingerprinted
        .filter(|(fp_processor, _)| *fp_processor == processor)
        .and_then(|(_, record_type)| record_type);

    let record_type = profile
        .record_type
        .or(inferred_type)
        .unwrap_or(RecordType::Subscription);

    tracing::debug!(
        processor = %processor,
        record_type = %record_type,
        from_profile = profile.processor.is_some(),
        "Detected payload source"
    );

    Ok(DetectedProfile {
        processor,
        record_type,
        billing_interval: profile.billing_interval,
        authorization_status: profile.authorization_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detect_bare(payload: Value) -> Result<DetectedProfile, ResolutionError> {
        detect(&ResolutionProfile::default(), &payload)
    }

    #[test]
    fn paypal_order_wins_over_paypal_subscription() {
        // Orders also carry create_time; purchase_units must be checked first.
        let detected = detect_bare(json!({
            "id": "5O190127TN364715T",
            "create_time": "2023-04-27T03:39:50Z",
            "purchase_units": []
        }))
        .unwrap();
        assert_eq!(detected.processor, Processor::Paypal);
        assert_eq!(detected.record_type, RecordType::Order);
    }

    #[test]
    fn paypal_subscription_detected_by_create_time() {
        let detected = detect_bare(json!({"id": "I-1", "create_time": "2023-04-28T02:16:58Z"})).unwrap();
        assert_eq!(detected.processor, Processor::Paypal);
        assert_eq!(detected.record_type, RecordType::Subscription);
    }

    #[test]
    fn chargebee_invoice_and_subscription() {
        let order = detect_bare(json!({"id": "inv_1", "line_items": []})).unwrap();
        assert_eq!(order.processor, Processor::Chargebee);
        assert_eq!(order.record_type, RecordType::Order);

        let sub = detect_bare(json!({"id": "cb_1", "billing_period_unit": "month"})).unwrap();
        assert_eq!(sub.processor, Processor::Chargebee);
        assert_eq!(sub.record_type, RecordType::Subscription);
    }

    #[test]
    fn stripe_uses_object_discriminator() {
        let order = detect_bare(json!({"id": "ch_1", "object": "charge"})).unwrap();
        assert_eq!(order.processor, Processor::Stripe);
        assert_eq!(order.record_type, RecordType::Order);

        let sub = detect_bare(json!({"id": "sub_1", "object": "subscription"})).unwrap();
        assert_eq!(sub.processor, Processor::Stripe);
        assert_eq!(sub.record_type, RecordType::Subscription);
    }

    #[test]
    fn coinbase_record_type_comes_from_profile() {
        let payload = json!({"id": "c1", "addresses": {"bitcoin": "bc1..."}});

        let defaulted = detect_bare(payload.clone()).unwrap();
        assert_eq!(defaulted.processor, Processor::Coinbase);
        assert_eq!(defaulted.record_type, RecordType::Subscription);

        let profile = ResolutionProfile::new().with_record_type(RecordType::Order);
        let explicit = detect(&profile, &payload).unwrap();
        assert_eq!(explicit.record_type, RecordType::Order);
    }

    #[test]
    fn unknown_shape_fails() {
        assert_eq!(
            detect_bare(json!({"id": "x", "status": "active"})),
            Err(ResolutionError::UnknownProcessor)
        );
    }

    #[test]
    fn caller_processor_wins_and_skips_foreign_record_type() {
        // Looks like a PayPal order, but the caller says Stripe.
        let profile = ResolutionProfile::new().with_processor(Processor::Stripe);
        let detected = detect(&profile, &json!({"purchase_units": []})).unwrap();
        assert_eq!(detected.processor, Processor::Stripe);
        assert_eq!(detected.record_type, RecordType::Subscription);
    }

    #[test]
    fn caller_processor_still_uses_matching_fingerprint_type() {
        let profile = ResolutionProfile::new().with_processor(Processor::Stripe);
        let detected = detect(&profile, &json!({"object": "charge"})).unwrap();
        assert_eq!(detected.record_type, RecordType::Order);
    }

    #[test]
    fn profile_hints_are_carried_through() {
        use super::super::{AuthorizationStatus, BillingInterval};

        let profile = ResolutionProfile::new()
            .with_billing_interval(BillingInterval::Weekly)
            .with_authorization_status(AuthorizationStatus::Failed);
        let detected = detect(&profile, &json!({"object": "subscription"})).unwrap();
        assert_eq!(detected.billing_interval, Some(BillingInterval::Weekly));
        assert!(detected.authorization_failed());
    }
}
