//! Coinbase Commerce field mapper.

use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{BillingInterval, IntermediateFields, Processor, ResolutionError};
use crate::ports::{decode, MappingContext, ProviderMapper};

use super::types::CoinbaseCharge;

/// Maps Coinbase Commerce charges for both record types.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinbaseMapper;

impl ProviderMapper for CoinbaseMapper {
    fn processor(&self) -> Processor {
        Processor::Coinbase
    }

    fn map(
        &self,
        ctx: &MappingContext<'_>,
        payload: &Value,
    ) -> Result<IntermediateFields, ResolutionError> {
        let charge: CoinbaseCharge = decode(Processor::Coinbase, payload)?;
        let created = charge.created_at.unwrap_or_default();

        let amount: f64 = charge
            .confirmed_payments()
            .map(|payment| payment.value.local.amount)
            .sum();
        let confirmed = charge.confirmed_payments().next().is_some();
        let paid_at = charge
            .confirmed_payments()
            .filter_map(|payment| payment.detected_at)
            .max()
            .unwrap_or(created);

        let status_token = charge.current_status().to_string();
        let refunded = charge.was_refunded();

        // Not derivable from the charge; the caller's hint or a one-time sale.
        let billing_interval = ctx
            .profile
            .billing_interval
            .unwrap_or(BillingInterval::Single);

        Ok(IntermediateFields {
            start: created,
            period_reference: created,
            cancelled: charge.created_at,
            last_payment_amount: amount,
            last_payment_at: if confirmed { paid_at } else { Timestamp::epoch() },
            billing_interval: Some(billing_interval),
            payment_completed: confirmed,
            refunded,
            ..IntermediateFields::new(charge.id, status_token)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::{DetectedProfile, RecordType};
    use serde_json::json;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn map(interval: Option<BillingInterval>, payload: Value) -> IntermediateFields {
        let profile = DetectedProfile {
            processor: Processor::Coinbase,
            record_type: RecordType::Subscription,
            billing_interval: interval,
            authorization_status: None,
        };
        CoinbaseMapper
            .map(
                &MappingContext::new(&profile, ts("2023-05-15T00:00:00Z")),
                &payload,
            )
            .unwrap()
    }

    fn confirmed_charge() -> Value {
        json!({
            "id": "f765421f-2c6b-4b8a-9f1e-0a7c6d2b1e11",
            "code": "66BEOV2A",
            "created_at": "2023-05-10T08:00:00Z",
            "addresses": {"bitcoin": "1KmNh..."},
            "pricing": {"local": {"amount": "16.00", "currency": "USD"}},
            "payments": [{
                "network": "ethereum",
                "status": "Confirmed",
                "value": {"local": {"amount": "16.00", "currency": "USD"}},
                "detected_at": "2023-05-10T08:05:00Z"
            }],
            "timeline": [
                {"status": "NEW", "time": "2023-05-10T08:00:00Z"},
                {"status": "COMPLETED", "time": "2023-05-10T08:05:00Z"}
            ]
        })
    }

    #[test]
    fn confirmed_charge_is_paid() {
        let fields = map(Some(BillingInterval::Monthly), confirmed_charge());
        assert!(fields.payment_completed);
        assert_eq!(fields.last_payment_amount, 16.0);
        assert_eq!(fields.last_payment_at, ts("2023-05-10T08:05:00Z"));
        assert_eq!(fields.start, ts("2023-05-10T08:00:00Z"));
        assert_eq!(fields.period_reference, ts("2023-05-10T08:00:00Z"));
        assert_eq!(fields.status_token, "COMPLETED");
        assert_eq!(fields.billing_interval, Some(BillingInterval::Monthly));
    }

    #[test]
    fn interval_defaults_to_single() {
        let fields = map(None, confirmed_charge());
        assert_eq!(fields.billing_interval, Some(BillingInterval::Single));
    }

    #[test]
    fn unconfirmed_charge_is_unpaid() {
        let fields = map(
            Some(BillingInterval::Monthly),
            json!({"id": "c", "created_at": "2023-05-10T08:00:00Z", "addresses": {}, "payments": []}),
        );
        assert!(!fields.payment_completed);
        assert_eq!(fields.last_payment_amount, 0.0);
        assert!(fields.last_payment_at.is_epoch());
        assert_eq!(fields.status_token, "NEW");
    }
}
