//! Canonical assembly.
//!
//! Merges the mapper, trial and expiration outputs into the persisted
//! record. Nothing here re-derives business state; it only shapes it.

use super::{
    BillingInterval, CanonicalSubscriptionState, DetectedProfile, Details, Expiration,
    InstantRecord, IntermediateFields, LastPaymentRecord, PaymentRecord, ResolutionError,
    ResolutionPolicy, TrialRecord, TrialState,
};

/// Optional output fields requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFlags {
    pub resolve_processor: bool,
    pub resolve_type: bool,
    pub redact_message: bool,
}

impl Default for OutputFlags {
    fn default() -> Self {
        Self {
            resolve_processor: true,
            resolve_type: true,
            redact_message: false,
        }
    }
}

/// Resolves the billing interval of a record.
///
/// Orders are always `Single`. Subscriptions take the mapper's interval,
/// then the caller's hint. Anything else is a mapper defect and must not
/// be defaulted.
pub fn resolve_billing_interval(
    profile: &DetectedProfile,
    fields: &IntermediateFields,
) -> Result<BillingInterval, ResolutionError> {
    if profile.record_type.is_order() {
        return Ok(BillingInterval::Single);
    }

    fields
        .billing_interval
        .or(profile.billing_interval)
        .ok_or_else(|| {
            tracing::warn!(
                processor = %profile.processor,
                external_id = %fields.external_id,
                "Subscription resolved without a billing interval"
            );
            ResolutionError::unknown_frequency(profile.processor)
        })
}

/// Builds the canonical record from the pipeline's stage outputs.
pub fn assemble(
    profile: &DetectedProfile,
    fields: IntermediateFields,
    interval: BillingInterval,
    trial: TrialState,
    expiration: Expiration,
    flags: OutputFlags,
    policy: &ResolutionPolicy,
) -> CanonicalSubscriptionState {
    let message = if flags.redact_message {
        policy.redaction_token.clone()
    } else {
        expiration.message
    };

    CanonicalSubscriptionState {
        processor: flags.resolve_processor.then_some(profile.processor),
        record_type: flags.resolve_type.then_some(profile.record_type),
        status: expiration.status,
        billing_interval: interval,
        external_resource_id: fields.external_id,
        payment: PaymentRecord {
            completed: fields.payment_completed,
            refunded: fields.refunded,
        },
        start: fields.start.into(),
        expires: expiration.expires.into(),
        cancelled: fields
            .cancelled
            .map(InstantRecord::from)
            .unwrap_or_else(InstantRecord::epoch),
        last_payment: LastPaymentRecord {
            amount: fields.last_payment_amount.max(0.0),
            date: fields.last_payment_at.into(),
        },
        trial: TrialRecord {
            claimed: trial.claimed,
            active: trial.active,
            days_left: trial.days_left,
            expires: trial.expires.into(),
        },
        details: Details { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscription::{Processor, RecordType, SubscriptionStatus};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn profile(record_type: RecordType) -> DetectedProfile {
        DetectedProfile {
            processor: Processor::Stripe,
            record_type,
            billing_interval: None,
            authorization_status: None,
        }
    }

    fn expiration() -> Expiration {
        Expiration {
            status: SubscriptionStatus::Active,
            expires: ts("2024-03-01T00:00:00Z"),
            message: "Stripe subscription status 'active' resolved to active".to_string(),
        }
    }

    #[test]
    fn orders_always_resolve_single() {
        let mut fields = IntermediateFields::new("ch_1", "succeeded");
        fields.billing_interval = Some(BillingInterval::Monthly);
        let interval = resolve_billing_interval(&profile(RecordType::Order), &fields).unwrap();
        assert_eq!(interval, BillingInterval::Single);
    }

    #[test]
    fn mapper_interval_wins_over_profile_hint() {
        let mut detected = profile(RecordType::Subscription);
        detected.billing_interval = Some(BillingInterval::Weekly);

        let mut fields = IntermediateFields::new("sub_1", "active");
        fields.billing_interval = Some(BillingInterval::Monthly);
        assert_eq!(
            resolve_billing_interval(&detected, &fields).unwrap(),
            BillingInterval::Monthly
        );

        fields.billing_interval = None;
        assert_eq!(
            resolve_billing_interval(&detected, &fields).unwrap(),
            BillingInterval::Weekly
        );
    }

    #[test]
    fn unresolved_subscription_interval_is_an_error() {
        let fields = IntermediateFields::new("sub_1", "active");
        let err = resolve_billing_interval(&profile(RecordType::Subscription), &fields).unwrap_err();
        assert_eq!(err, ResolutionError::unknown_frequency(Processor::Stripe));
    }

    #[test]
    fn assemble_converts_instants_and_defaults_cancelled_to_epoch() {
        let fields = IntermediateFields {
            start: ts("2023-01-01T00:00:00Z"),
            last_payment_amount: 12.5,
            last_payment_at: ts("2023-01-01T00:00:00Z"),
            payment_completed: true,
            ..IntermediateFields::new("sub_1", "active")
        };
        let record = assemble(
            &profile(RecordType::Subscription),
            fields,
            BillingInterval::Monthly,
            TrialState::none(),
            expiration(),
            OutputFlags::default(),
            &ResolutionPolicy::default(),
        );

        assert_eq!(record.processor, Some(Processor::Stripe));
        assert_eq!(record.record_type, Some(RecordType::Subscription));
        assert_eq!(record.external_resource_id, "sub_1");
        assert_eq!(record.start.timestamp_unix, 1672531200);
        assert_eq!(record.expires.timestamp, ts("2024-03-01T00:00:00Z"));
        assert!(record.cancelled.is_epoch());
        assert!(record.trial.expires.is_epoch());
        assert_eq!(record.last_payment.amount, 12.5);
        assert!(record.payment.completed);
    }

    #[test]
    fn flags_control_optional_fields_and_redaction() {
        let flags = OutputFlags {
            resolve_processor: false,
            resolve_type: false,
            redact_message: true,
        };
        let record = assemble(
            &profile(RecordType::Subscription),
            IntermediateFields::new("sub_1", "active"),
            BillingInterval::Monthly,
            TrialState::none(),
            expiration(),
            flags,
            &ResolutionPolicy::default(),
        );

        assert!(record.processor.is_none());
        assert!(record.record_type.is_none());
        assert_eq!(record.details.message, "[redacted]");
    }
}
