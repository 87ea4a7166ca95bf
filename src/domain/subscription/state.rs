//! Canonical subscription state - the engine's output record.
//!
//! Created fresh per resolution and never mutated afterwards. Callers persist
//! it wholesale or discard it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{BillingInterval, Processor, RecordType, SubscriptionStatus};

/// An instant in its persisted form: absolute time plus integer unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantRecord {
    pub timestamp: Timestamp,
    pub timestamp_unix: i64,
}

impl InstantRecord {
    pub fn epoch() -> Self {
        Self::from(Timestamp::epoch())
    }

    pub fn is_epoch(&self) -> bool {
        self.timestamp.is_epoch()
    }
}

impl From<Timestamp> for InstantRecord {
    fn from(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            timestamp_unix: timestamp.as_unix_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub completed: bool,
    pub refunded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastPaymentRecord {
    /// Major currency units.
    pub amount: f64,
    pub date: InstantRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    /// A trial was offered at some point.
    pub claimed: bool,
    pub active: bool,
    pub days_left: u32,
    pub expires: InstantRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    pub message: String,
}

/// Provider-agnostic subscription state used to gate feature access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSubscriptionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<Processor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,

    pub status: SubscriptionStatus,
    pub billing_interval: BillingInterval,
    pub external_resource_id: String,
    pub payment: PaymentRecord,
    pub start: InstantRecord,
    pub expires: InstantRecord,
    pub cancelled: InstantRecord,
    pub last_payment: LastPaymentRecord,
    pub trial: TrialRecord,
    pub details: Details,
}

impl CanonicalSubscriptionState {
    /// Returns true if the holder should have access at `now`.
    ///
    /// Requires an active status and an expiry strictly after `now`;
    /// the epoch sentinel never grants access.
    pub fn has_access(&self, now: Timestamp) -> bool {
        self.status.grants_access()
            && !self.expires.is_epoch()
            && self.expires.timestamp.is_after(&now)
    }
}
