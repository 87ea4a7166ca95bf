//! Provider-neutral intermediate shape produced by the field mappers.

use crate::domain::foundation::Timestamp;

use super::BillingInterval;

/// A trial period declared by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TrialWindow {
    /// Builds a window when both ends are known.
    pub fn from_bounds(start: Option<Timestamp>, end: Option<Timestamp>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) if !start.is_epoch() && !end.is_epoch() => {
                Some(Self { start, end })
            }
            _ => None,
        }
    }

    pub fn length_days(&self) -> f64 {
        self.end.days_since(&self.start)
    }

    /// Zero-length and same-day windows do not count as an offered trial.
    pub fn is_claimable(&self) -> bool {
        self.length_days() > 1.0
    }
}

/// Provider signal that forces a status regardless of the status token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOverride {
    /// PayPal: failed payments on an otherwise active subscription.
    FailedPayments(u32),

    /// Chargebee: unpaid dues (minor currency units) on an active or trialing subscription.
    OutstandingDues(i64),

    /// PayPal: still nominally trialing past the declared trial length.
    TrialGraceViolation { days_since_start: i64 },
}

/// What a mapper extracts from a provider payload.
///
/// Absent optional data is represented by zero, `false`, `None`, or the
/// epoch sentinel. Later stages decide what those defaults mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntermediateFields {
    pub external_id: String,

    /// Provider-native status token, kept verbatim.
    pub status_token: String,

    pub start: Timestamp,

    /// Instant the next access extension is measured from.
    pub period_reference: Timestamp,

    pub cancelled: Option<Timestamp>,

    /// Amount in major currency units.
    pub last_payment_amount: f64,
    pub last_payment_at: Timestamp,

    pub billing_interval: Option<BillingInterval>,

    pub trial_window: Option<TrialWindow>,

    /// Trial end the provider itself reports (PayPal next billing time).
    pub declared_trial_end: Option<Timestamp>,

    pub status_override: Option<StatusOverride>,

    /// The provider considers the record to be in a trial.
    pub trialing: bool,

    /// A qualifying payment has replaced the trial designation.
    pub trial_superseded: bool,

    pub payment_completed: bool,
    pub refunded: bool,
}

impl IntermediateFields {
    /// Starts a record with identity and status; everything else defaults.
    pub fn new(external_id: impl Into<String>, status_token: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            status_token: status_token.into(),
            ..Self::default()
        }
    }
}
