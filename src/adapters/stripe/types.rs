//! Stripe API objects as they arrive in API responses and webhook payloads.
//!
//! These types are designed to:
//! - Parse both old and new API versions (period fields moved onto items)
//! - Accept `latest_invoice` as an id or an expanded object
//! - Default everything the mapper can live without

use serde::Deserialize;

use crate::domain::foundation::{lenient_timestamp, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Charges
// ════════════════════════════════════════════════════════════════════════════════

/// A Stripe charge, the one-time purchase record.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCharge {
    /// Unique charge identifier (ch_...).
    #[serde(default)]
    pub id: String,

    /// Charge status (succeeded, pending, failed).
    pub status: String,

    /// Amount in cents.
    #[serde(default)]
    pub amount: i64,

    #[serde(default)]
    pub amount_captured: i64,

    #[serde(default)]
    pub amount_refunded: i64,

    #[serde(default)]
    pub paid: bool,

    /// Fully refunded.
    #[serde(default)]
    pub refunded: bool,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created: Option<Timestamp>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Subscriptions
// ════════════════════════════════════════════════════════════════════════════════

/// A Stripe subscription object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    #[serde(default)]
    pub id: String,

    /// Subscription status.
    pub status: String,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_date: Option<Timestamp>,

    /// Top-level period fields, absent on newer API versions.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub current_period_start: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub current_period_end: Option<Timestamp>,

    /// When cancellation was requested.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub canceled_at: Option<Timestamp>,

    /// When the subscription ended.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub ended_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub trial_start: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub trial_end: Option<Timestamp>,

    /// Subscription items (price/quantity pairs).
    #[serde(default)]
    pub items: StripeSubscriptionItems,

    #[serde(default)]
    pub latest_invoice: Option<StripeLatestInvoice>,

    /// Legacy single-plan field.
    #[serde(default)]
    pub plan: Option<StripePlan>,
}

impl StripeSubscription {
    pub fn first_item(&self) -> Option<&StripeSubscriptionItem> {
        self.items.data.first()
    }

    /// Period start from the top level, else from the first item.
    pub fn period_start(&self) -> Option<Timestamp> {
        self.current_period_start
            .or_else(|| self.first_item().and_then(|item| item.current_period_start))
    }

    pub fn period_end(&self) -> Option<Timestamp> {
        self.current_period_end
            .or_else(|| self.first_item().and_then(|item| item.current_period_end))
    }

    /// Recurring interval unit (day, week, month, year).
    pub fn interval_unit(&self) -> Option<&str> {
        let item = self.first_item();
        item.and_then(|i| i.price.as_ref())
            .and_then(|p| p.recurring.as_ref())
            .map(|r| r.interval.as_str())
            .or_else(|| item.and_then(|i| i.plan.as_ref()).map(|p| p.interval.as_str()))
            .or_else(|| self.plan.as_ref().map(|p| p.interval.as_str()))
            .filter(|unit| !unit.is_empty())
    }

    /// Recurring price in cents for the first item, times quantity.
    pub fn recurring_amount(&self) -> i64 {
        let item = self.first_item();
        let unit = item
            .and_then(|i| i.price.as_ref())
            .and_then(|p| p.unit_amount)
            .or_else(|| item.and_then(|i| i.plan.as_ref()).and_then(|p| p.amount))
            .or_else(|| self.plan.as_ref().and_then(|p| p.amount))
            .unwrap_or(0);
        let quantity = item.map(|i| i.quantity).unwrap_or(1).max(1);
        unit.saturating_mul(quantity)
    }
}

/// Subscription items wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripeSubscriptionItems {
    #[serde(default)]
    pub data: Vec<StripeSubscriptionItem>,
}

/// Individual subscription item.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscriptionItem {
    #[serde(default)]
    pub id: String,

    /// Period fields live here on newer API versions.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub current_period_start: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub current_period_end: Option<Timestamp>,

    #[serde(default)]
    pub price: Option<StripePrice>,

    #[serde(default)]
    pub plan: Option<StripePlan>,

    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripePrice {
    #[serde(default)]
    pub id: String,

    /// Unit amount in cents.
    #[serde(default)]
    pub unit_amount: Option<i64>,

    #[serde(default)]
    pub recurring: Option<StripePriceRecurring>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripePriceRecurring {
    /// Billing interval (day, week, month, year).
    #[serde(default)]
    pub interval: String,

    #[serde(default)]
    pub interval_count: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripePlan {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub amount: Option<i64>,

    #[serde(default)]
    pub interval: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Invoices
// ════════════════════════════════════════════════════════════════════════════════

/// `latest_invoice` is an id unless the request expanded it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StripeLatestInvoice {
    Expanded(StripeInvoice),
    Id(String),
}

impl StripeLatestInvoice {
    pub fn expanded(&self) -> Option<&StripeInvoice> {
        match self {
            StripeLatestInvoice::Expanded(invoice) => Some(invoice),
            StripeLatestInvoice::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripeInvoice {
    #[serde(default)]
    pub id: String,

    /// Invoice status (draft, open, paid, void, uncollectible).
    #[serde(default)]
    pub status: String,

    /// Amount paid in cents.
    #[serde(default)]
    pub amount_paid: i64,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created: Option<Timestamp>,

    #[serde(default)]
    pub status_transitions: StripeStatusTransitions,
}

impl StripeInvoice {
    pub fn paid_at(&self) -> Option<Timestamp> {
        self.status_transitions.paid_at.or(self.created)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripeStatusTransitions {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub paid_at: Option<Timestamp>,
}
