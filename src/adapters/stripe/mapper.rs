//! Stripe field mapper.

use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{
    BillingInterval, IntermediateFields, Processor, RecordType, ResolutionError, TrialWindow,
};
use crate::ports::{decode, MappingContext, ProviderMapper};

use super::types::{StripeCharge, StripeSubscription};

/// Maps Stripe charges (orders) and subscriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripeMapper;

impl ProviderMapper for StripeMapper {
    fn processor(&self) -> Processor {
        Processor::Stripe
    }

    fn map(
        &self,
        ctx: &MappingContext<'_>,
        payload: &Value,
    ) -> Result<IntermediateFields, ResolutionError> {
        match ctx.record_type() {
            RecordType::Order => {
                let charge: StripeCharge = decode(Processor::Stripe, payload)?;
                Ok(map_charge(charge))
            }
            RecordType::Subscription => {
                let subscription: StripeSubscription = decode(Processor::Stripe, payload)?;
                Ok(map_subscription(subscription))
            }
        }
    }
}

fn cents(amount: i64) -> f64 {
    amount as f64 / 100.0
}

fn map_charge(charge: StripeCharge) -> IntermediateFields {
    let created = charge.created.unwrap_or_default();
    let completed = charge.paid && charge.status.eq_ignore_ascii_case("succeeded");
    let refunded = charge.refunded || charge.amount_refunded > 0;

    let captured = if charge.amount_captured > 0 {
        charge.amount_captured
    } else {
        charge.amount
    };
    let amount = if completed { cents(captured) } else { 0.0 };

    IntermediateFields {
        start: created,
        period_reference: created,
        cancelled: charge.created,
        last_payment_amount: amount,
        last_payment_at: if completed { created } else { Timestamp::epoch() },
        billing_interval: Some(BillingInterval::Single),
        payment_completed: completed,
        refunded,
        ..IntermediateFields::new(charge.id, charge.status)
    }
}

fn map_subscription(sub: StripeSubscription) -> IntermediateFields {
    let start = sub.start_date.or(sub.created).unwrap_or_default();
    let period_start = sub.period_start();
    let trialing = sub.status.eq_ignore_ascii_case("trialing");
    let active = sub.status.eq_ignore_ascii_case("active");

    let paid_invoice = sub
        .latest_invoice
        .as_ref()
        .and_then(|invoice| invoice.expanded())
        .filter(|invoice| invoice.amount_paid > 0);

    let (amount, paid_at) = match paid_invoice {
        Some(invoice) => (
            cents(invoice.amount_paid),
            invoice.paid_at().or(period_start).unwrap_or(start),
        ),
        None if active => {
            let amount = sub.recurring_amount();
            if amount > 0 {
                (cents(amount), period_start.unwrap_or(start))
            } else {
                (0.0, Timestamp::epoch())
            }
        }
        None => (0.0, Timestamp::epoch()),
    };

    IntermediateFields {
        start,
        period_reference: period_start.unwrap_or(start),
        cancelled: sub.canceled_at.or(sub.ended_at),
        last_payment_amount: amount,
        last_payment_at: paid_at,
        billing_interval: sub.interval_unit().and_then(BillingInterval::from_unit),
        trial_window: TrialWindow::from_bounds(sub.trial_start, sub.trial_end),
        trialing,
        payment_completed: amount > 0.0,
        ..IntermediateFields::new(sub.id, sub.status)
    }
}
