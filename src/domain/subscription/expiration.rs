//! Expiration and grace rules.
//!
//! The base expiry is computed first, then an ordered list of grace rules is
//! applied. Rules only move the result toward denial: expiry toward epoch,
//! status toward suspended. Rule order is significant.

use crate::domain::foundation::Timestamp;

use super::{
    BillingInterval, Classification, IntermediateFields, ResolutionPolicy, SubscriptionStatus,
    TrialState,
};

/// Inputs to the grace calculator that are not carried by the mapper output.
#[derive(Debug, Clone, Copy)]
pub struct GraceInputs<'a> {
    pub fields: &'a IntermediateFields,
    pub interval: BillingInterval,
    pub trial: &'a TrialState,
    pub authorization_failed: bool,
}

/// Final status, expiry and message after all grace rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiration {
    pub status: SubscriptionStatus,
    pub expires: Timestamp,
    pub message: String,
}

/// Applies the base extension and the grace rules in order.
pub fn resolve_expiration(
    classification: Classification,
    inputs: GraceInputs<'_>,
    policy: &ResolutionPolicy,
) -> Expiration {
    let GraceInputs {
        fields,
        interval,
        trial,
        authorization_failed,
    } = inputs;

    let mut status = classification.status;
    let mut message = classification.message;
    let trialing = trial.active;

    let mut expires = base_expiry(status, trialing, interval, fields, trial, policy);

    if !trialing && (!fields.payment_completed || fields.last_payment_amount == 0.0) {
        tracing::debug!(rule = "unpaid", "Grace rule forces epoch expiry");
        expires = Timestamp::epoch();
    }

    if trialing && authorization_failed {
        tracing::debug!(rule = "trial_authorization_failed", "Grace rule forces suspension");
        status = SubscriptionStatus::Suspended;
        message = "Suspended: trial authorization charge failed".to_string();
    }

    if fields.refunded && status == SubscriptionStatus::Cancelled {
        tracing::debug!(rule = "refunded", "Grace rule forces epoch expiry");
        expires = Timestamp::epoch();
    }

    if status == SubscriptionStatus::Suspended {
        tracing::debug!(rule = "suspended", "Grace rule forces epoch expiry");
        expires = Timestamp::epoch();
    }

    Expiration {
        status,
        expires,
        message,
    }
}

fn base_expiry(
    status: SubscriptionStatus,
    trialing: bool,
    interval: BillingInterval,
    fields: &IntermediateFields,
    trial: &TrialState,
    policy: &ResolutionPolicy,
) -> Timestamp {
    let active = status == SubscriptionStatus::Active;
    if active && trialing {
        return trial.expires;
    }

    let reference = if fields.period_reference.is_epoch() {
        fields.start
    } else {
        fields.period_reference
    };
    if reference.is_epoch() {
        return Timestamp::epoch();
    }

    if active {
        // Slack for providers that refresh period fields late.
        reference
            .add_years(policy.active_grace_years)
            .add_months(policy.active_grace_months)
    } else {
        interval.extend(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn paid_fields(reference: &str) -> IntermediateFields {
        IntermediateFields {
            start: ts(reference),
            period_reference: ts(reference),
            last_payment_amount: 10.0,
            last_payment_at: ts(reference),
            payment_completed: true,
            ..IntermediateFields::new("sub_1", "active")
        }
    }

    fn classified(status: SubscriptionStatus) -> Classification {
        Classification {
            status,
            message: "base".to_string(),
        }
    }

    fn run(
        status: SubscriptionStatus,
        fields: &IntermediateFields,
        interval: BillingInterval,
        trial: &TrialState,
        authorization_failed: bool,
    ) -> Expiration {
        resolve_expiration(
            classified(status),
            GraceInputs {
                fields,
                interval,
                trial,
                authorization_failed,
            },
            &ResolutionPolicy::default(),
        )
    }

    fn active_trial(expires: &str) -> TrialState {
        TrialState {
            claimed: true,
            active: true,
            days_left: 7,
            expires: ts(expires),
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Base extension
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn active_paid_subscription_gets_generous_window() {
        let fields = paid_fields("2023-01-15T00:00:00Z");
        let result = run(
            SubscriptionStatus::Active,
            &fields,
            BillingInterval::Monthly,
            &TrialState::none(),
            false,
        );
        assert_eq!(result.status, SubscriptionStatus::Active);
        assert_eq!(result.expires, ts("2024-03-15T00:00:00Z"));
        assert_eq!(result.message, "base");
    }

    #[test]
    fn cancelled_paid_subscription_extends_one_interval() {
        let fields = paid_fields("2023-01-31T00:00:00Z");
        let result = run(
            SubscriptionStatus::Cancelled,
            &fields,
            BillingInterval::Monthly,
            &TrialState::none(),
            false,
        );
        assert_eq!(result.expires, ts("2023-02-28T00:00:00Z"));
    }

    #[test]
    fn single_purchase_expires_at_reference() {
        let fields = paid_fields("2023-04-27T03:39:50Z");
        let result = run(
            SubscriptionStatus::Cancelled,
            &fields,
            BillingInterval::Single,
            &TrialState::none(),
            false,
        );
        assert_eq!(result.expires, ts("2023-04-27T03:39:50Z"));
    }

    #[test]
    fn active_trial_uses_trial_expiry() {
        let fields = IntermediateFields {
            start: ts("2023-03-01T00:00:00Z"),
            ..IntermediateFields::new("sub_1", "trialing")
        };
        let trial = active_trial("2023-03-15T00:00:00Z");
        let result = run(
            SubscriptionStatus::Active,
            &fields,
            BillingInterval::Monthly,
            &trial,
            false,
        );
        assert_eq!(result.expires, ts("2023-03-15T00:00:00Z"));
    }

    #[test]
    fn missing_reference_yields_epoch() {
        let mut fields = paid_fields("2023-01-01T00:00:00Z");
        fields.start = Timestamp::epoch();
        fields.period_reference = Timestamp::epoch();
        let result = run(
            SubscriptionStatus::Active,
            &fields,
            BillingInterval::Monthly,
            &TrialState::none(),
            false,
        );
        assert!(result.expires.is_epoch());
    }

    // ══════════════════════════════════════════════════════════════
    // Grace rules
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn unpaid_non_trial_is_forced_to_epoch() {
        let mut fields = paid_fields("2023-01-01T00:00:00Z");
        fields.payment_completed = false;
        let result = run(
            SubscriptionStatus::Active,
            &fields,
            BillingInterval::Monthly,
            &TrialState::none(),
            false,
        );
        assert!(result.expires.is_epoch());
        assert_eq!(result.status, SubscriptionStatus::Active);
    }

    #[test]
    fn zero_amount_payment_is_forced_to_epoch() {
        let mut fields = paid_fields("2023-01-01T00:00:00Z");
        fields.last_payment_amount = 0.0;
        let result = run(
            SubscriptionStatus::Active,
            &fields,
            BillingInterval::Monthly,
            &TrialState::none(),
            false,
        );
        assert!(result.expires.is_epoch());
    }

    #[test]
    fn failed_trial_authorization_suspends_and_zeroes_expiry() {
        let fields = IntermediateFields::new("sub_1", "trialing");
        let trial = active_trial("2023-03-15T00:00:00Z");
        let result = run(
            SubscriptionStatus::Active,
            &fields,
            BillingInterval::Monthly,
            &trial,
            true,
        );
        assert_eq!(result.status, SubscriptionStatus::Suspended);
        assert!(result.message.contains("authorization"));
        assert!(result.expires.is_epoch());
    }

    #[test]
    fn failed_authorization_without_trial_is_ignored() {
        let fields = paid_fields("2023-01-15T00:00:00Z");
        let result = run(
            SubscriptionStatus::Active,
            &fields,
            BillingInterval::Monthly,
            &TrialState::none(),
            true,
        );
        assert_eq!(result.status, SubscriptionStatus::Active);
        assert!(!result.expires.is_epoch());
    }

    #[test]
    fn refunded_cancellation_is_forced_to_epoch() {
        let mut fields = paid_fields("2023-01-01T00:00:00Z");
        fields.refunded = true;
        let result = run(
            SubscriptionStatus::Cancelled,
            &fields,
            BillingInterval::Single,
            &TrialState::none(),
            false,
        );
        assert!(result.expires.is_epoch());
    }

    #[test]
    fn refund_on_active_subscription_keeps_expiry() {
        let mut fields = paid_fields("2023-01-15T00:00:00Z");
        fields.refunded = true;
        let result = run(
            SubscriptionStatus::Active,
            &fields,
            BillingInterval::Monthly,
            &TrialState::none(),
            false,
        );
        assert!(!result.expires.is_epoch());
    }

    #[test]
    fn suspended_always_yields_epoch() {
        let fields = paid_fields("2023-01-01T00:00:00Z");
        let result = run(
            SubscriptionStatus::Suspended,
            &fields,
            BillingInterval::Annually,
            &TrialState::none(),
            false,
        );
        assert!(result.expires.is_epoch());
    }
}
