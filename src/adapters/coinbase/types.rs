//! Coinbase Commerce charge object.
//!
//! Charges look the same whether the caller sold a one-time item or a
//! period of access, so the record type and interval come from the caller.

use serde::Deserialize;

use crate::domain::foundation::{lenient_amount, lenient_timestamp, Timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct CoinbaseCharge {
    #[serde(default)]
    pub id: String,

    /// Short human-facing charge code.
    #[serde(default)]
    pub code: String,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,

    #[serde(default)]
    pub pricing: CoinbasePricing,

    #[serde(default)]
    pub payments: Vec<CoinbasePayment>,

    /// Status history, oldest first.
    #[serde(default)]
    pub timeline: Vec<CoinbaseTimelineEntry>,
}

impl CoinbaseCharge {
    /// Latest timeline status, `NEW` for a charge without history.
    pub fn current_status(&self) -> &str {
        self.timeline
            .last()
            .map(|entry| entry.status.as_str())
            .filter(|status| !status.is_empty())
            .unwrap_or("NEW")
    }

    pub fn was_refunded(&self) -> bool {
        self.timeline
            .iter()
            .any(|entry| entry.status.eq_ignore_ascii_case("REFUNDED"))
    }

    /// Payments the network confirmed. Casing changed historically.
    pub fn confirmed_payments(&self) -> impl Iterator<Item = &CoinbasePayment> {
        self.payments
            .iter()
            .filter(|payment| payment.status.eq_ignore_ascii_case("confirmed"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinbasePricing {
    #[serde(default)]
    pub local: Option<CoinbaseMoney>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinbaseMoney {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,

    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinbasePayment {
    #[serde(default)]
    pub network: String,

    #[serde(default)]
    pub transaction_id: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub value: CoinbasePaymentValue,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub detected_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinbasePaymentValue {
    /// Value in the charge's local (fiat) currency.
    #[serde(default)]
    pub local: CoinbaseMoney,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinbaseTimelineEntry {
    #[serde(default)]
    pub status: String,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub time: Option<Timestamp>,
}
