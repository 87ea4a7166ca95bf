//! PayPal API objects as they arrive in API responses and webhook resources.
//!
//! Only the fields the mapper reads are modelled. Everything optional
//! defaults so partial payloads still decode; `status` is required.

use serde::Deserialize;

use crate::domain::foundation::{lenient_amount, lenient_timestamp, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Shared
// ════════════════════════════════════════════════════════════════════════════════

/// Monetary amount. PayPal sends decimal strings in major units.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalMoney {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,

    #[serde(default)]
    pub currency_code: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Orders v2
// ════════════════════════════════════════════════════════════════════════════════

/// A PayPal order (one-time purchase).
#[derive(Debug, Clone, Deserialize)]
pub struct PaypalOrder {
    #[serde(default)]
    pub id: String,

    /// CREATED, SAVED, APPROVED, VOIDED, COMPLETED, PAYER_ACTION_REQUIRED.
    pub status: String,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub create_time: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub update_time: Option<Timestamp>,

    #[serde(default)]
    pub purchase_units: Vec<PaypalPurchaseUnit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalPurchaseUnit {
    #[serde(default)]
    pub amount: Option<PaypalMoney>,

    #[serde(default)]
    pub payments: PaypalPayments,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalPayments {
    #[serde(default)]
    pub captures: Vec<PaypalCapture>,

    #[serde(default)]
    pub refunds: Vec<PaypalRefund>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalCapture {
    #[serde(default)]
    pub id: String,

    /// COMPLETED, DECLINED, PARTIALLY_REFUNDED, PENDING, REFUNDED, FAILED.
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub amount: PaypalMoney,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub create_time: Option<Timestamp>,
}

impl PaypalCapture {
    /// The capture moved money at some point, even if later refunded.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status.to_ascii_uppercase().as_str(),
            "COMPLETED" | "REFUNDED" | "PARTIALLY_REFUNDED"
        )
    }

    pub fn is_refunded(&self) -> bool {
        matches!(
            self.status.to_ascii_uppercase().as_str(),
            "REFUNDED" | "PARTIALLY_REFUNDED"
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalRefund {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub status: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Billing v1 subscriptions
// ════════════════════════════════════════════════════════════════════════════════

/// A PayPal billing subscription, optionally with its plan embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct PaypalSubscription {
    #[serde(default)]
    pub id: String,

    /// APPROVAL_PENDING, APPROVED, ACTIVE, SUSPENDED, CANCELLED, EXPIRED.
    pub status: String,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_time: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub create_time: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub status_update_time: Option<Timestamp>,

    #[serde(default)]
    pub billing_info: PaypalBillingInfo,

    /// Present when the subscription was fetched with `plan` expanded.
    #[serde(default)]
    pub plan: Option<PaypalPlan>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalBillingInfo {
    #[serde(default)]
    pub last_payment: Option<PaypalLastPayment>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub next_billing_time: Option<Timestamp>,

    #[serde(default)]
    pub failed_payments_count: u32,

    #[serde(default)]
    pub cycle_executions: Vec<PaypalCycleExecution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalLastPayment {
    #[serde(default)]
    pub amount: PaypalMoney,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub time: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalCycleExecution {
    /// TRIAL or REGULAR.
    #[serde(default)]
    pub tenure_type: String,

    #[serde(default)]
    pub cycles_completed: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalPlan {
    #[serde(default)]
    pub billing_cycles: Vec<PaypalBillingCycle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalBillingCycle {
    #[serde(default)]
    pub tenure_type: String,

    #[serde(default)]
    pub frequency: PaypalFrequency,

    #[serde(default)]
    pub total_cycles: u32,

    #[serde(default)]
    pub pricing_scheme: Option<PaypalPricingScheme>,
}

impl PaypalBillingCycle {
    pub fn is_trial(&self) -> bool {
        self.tenure_type.eq_ignore_ascii_case("TRIAL")
    }

    pub fn is_regular(&self) -> bool {
        self.tenure_type.eq_ignore_ascii_case("REGULAR")
    }

    /// A trial tier with no fixed price, or a zero price, is free.
    pub fn is_free(&self) -> bool {
        self.pricing_scheme
            .as_ref()
            .and_then(|scheme| scheme.fixed_price.as_ref())
            .map(|price| price.value == 0.0)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalFrequency {
    /// DAY, WEEK, MONTH, YEAR.
    #[serde(default)]
    pub interval_unit: String,

    #[serde(default = "default_interval_count")]
    pub interval_count: u32,
}

fn default_interval_count() -> u32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaypalPricingScheme {
    #[serde(default)]
    pub fixed_price: Option<PaypalMoney>,
}
