//! Chargebee API objects (v2) as they arrive in API responses and webhooks.
//!
//! Chargebee reports money in minor currency units (cents) and instants
//! as unix seconds.

use serde::Deserialize;

use crate::domain::foundation::{lenient_timestamp, Timestamp};

/// A Chargebee invoice, the one-time purchase record.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargebeeInvoice {
    #[serde(default)]
    pub id: String,

    /// paid, posted, payment_due, not_paid, voided, pending.
    pub status: String,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub paid_at: Option<Timestamp>,

    #[serde(default)]
    pub total: i64,

    #[serde(default)]
    pub amount_paid: i64,

    #[serde(default)]
    pub line_items: Vec<ChargebeeLineItem>,

    #[serde(default)]
    pub issued_credit_notes: Vec<ChargebeeCreditNoteRef>,
}

impl ChargebeeInvoice {
    pub fn is_paid(&self) -> bool {
        self.status.eq_ignore_ascii_case("paid")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChargebeeLineItem {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub amount: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChargebeeCreditNoteRef {
    #[serde(default)]
    pub cn_id: String,

    #[serde(default)]
    pub cn_status: String,
}

/// A Chargebee subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargebeeSubscription {
    #[serde(default)]
    pub id: String,

    /// future, in_trial, active, non_renewing, paused, cancelled.
    pub status: String,

    #[serde(default)]
    pub billing_period: u32,

    /// day, week, month, year.
    #[serde(default)]
    pub billing_period_unit: String,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub started_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub activated_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub current_term_start: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub current_term_end: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub cancelled_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub trial_start: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub trial_end: Option<Timestamp>,

    /// Unpaid amount across due invoices, minor units.
    #[serde(default)]
    pub total_dues: i64,

    #[serde(default)]
    pub due_invoices_count: u32,

    /// Plan price for legacy (product catalog 1.0) sites, minor units.
    #[serde(default)]
    pub plan_amount: i64,

    #[serde(default)]
    pub subscription_items: Vec<ChargebeeSubscriptionItem>,
}

impl ChargebeeSubscription {
    /// Recurring price in minor units, from the plan or the plan item.
    pub fn recurring_amount(&self) -> i64 {
        if self.plan_amount > 0 {
            return self.plan_amount;
        }
        self.subscription_items
            .iter()
            .filter(|item| item.item_type.is_empty() || item.item_type.eq_ignore_ascii_case("plan"))
            .map(|item| if item.amount > 0 { item.amount } else { item.unit_price })
            .fold(0i64, i64::saturating_add)
    }
}

/// Product catalog 2.0 line on a subscription.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChargebeeSubscriptionItem {
    #[serde(default)]
    pub item_price_id: String,

    /// plan, addon, charge.
    #[serde(default)]
    pub item_type: String,

    #[serde(default)]
    pub unit_price: i64,

    #[serde(default)]
    pub amount: i64,
}
