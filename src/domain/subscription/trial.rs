//! Trial resolution.

use crate::domain::foundation::Timestamp;

use super::{IntermediateFields, Processor, ResolutionPolicy, StatusOverride, SubscriptionStatus};

/// Resolved trial facts for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialState {
    /// A trial window longer than one day was offered at some point.
    pub claimed: bool,
    pub active: bool,
    pub days_left: u32,
    /// Epoch when no trial was claimed.
    pub expires: Timestamp,
}

impl TrialState {
    pub fn none() -> Self {
        Self {
            claimed: false,
            active: false,
            days_left: 0,
            expires: Timestamp::epoch(),
        }
    }
}

/// Determines trial claim, activity, expiry and days left.
///
/// An active trial ends `policy.trial_window_days` after the window start,
/// whatever length the provider declared. PayPal is the exception: its
/// declared next billing time is the trial end, both for a live trial and
/// for one that overran its declared length.
pub fn resolve_trial(
    processor: Processor,
    fields: &IntermediateFields,
    status: SubscriptionStatus,
    today: Timestamp,
    policy: &ResolutionPolicy,
) -> TrialState {
    let Some(window) = fields.trial_window.filter(|w| w.is_claimable()) else {
        return TrialState::none();
    };

    let active = status == SubscriptionStatus::Active
        && fields.trialing
        && !fields.trial_superseded;

    let grace_violation = matches!(
        fields.status_override,
        Some(StatusOverride::TrialGraceViolation { .. })
    );

    let business_end = window.start.add_days(policy.trial_window_days);
    let expires = if processor == Processor::Paypal && (active || grace_violation) {
        fields.declared_trial_end.unwrap_or(business_end)
    } else if active {
        business_end
    } else {
        window.end
    };

    TrialState {
        claimed: true,
        active,
        days_left: days_between(expires, today),
        expires,
    }
}

/// Whole days between two instants, rounded, never negative.
fn days_between(end: Timestamp, today: Timestamp) -> u32 {
    let days = end.days_since(&today).abs().round();
    days.min(f64::from(u32::MAX)) as u32
}
