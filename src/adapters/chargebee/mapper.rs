//! Chargebee field mapper.

use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{
    BillingInterval, IntermediateFields, Processor, RecordType, ResolutionError, StatusOverride,
    TrialWindow,
};
use crate::ports::{decode, MappingContext, ProviderMapper};

use super::types::{ChargebeeInvoice, ChargebeeSubscription};

/// Maps Chargebee invoices (orders) and subscriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargebeeMapper;

impl ProviderMapper for ChargebeeMapper {
    fn processor(&self) -> Processor {
        Processor::Chargebee
    }

    fn map(
        &self,
        ctx: &MappingContext<'_>,
        payload: &Value,
    ) -> Result<IntermediateFields, ResolutionError> {
        match ctx.record_type() {
            RecordType::Order => {
                let invoice: ChargebeeInvoice = decode(Processor::Chargebee, payload)?;
                Ok(map_invoice(invoice))
            }
            RecordType::Subscription => {
                let subscription: ChargebeeSubscription = decode(Processor::Chargebee, payload)?;
                Ok(map_subscription(subscription))
            }
        }
    }
}

fn minor_to_major(minor: i64) -> f64 {
    minor as f64 / 100.0
}

fn map_invoice(invoice: ChargebeeInvoice) -> IntermediateFields {
    let issued = invoice.date.or(invoice.paid_at).unwrap_or_default();
    let paid = invoice.is_paid();

    let (amount, paid_at) = if paid {
        let minor = if invoice.amount_paid > 0 {
            invoice.amount_paid
        } else {
            invoice.total
        };
        (minor_to_major(minor), invoice.paid_at.unwrap_or(issued))
    } else {
        (0.0, Timestamp::epoch())
    };

    IntermediateFields {
        start: issued,
        period_reference: if paid_at.is_epoch() { issued } else { paid_at },
        cancelled: invoice.date,
        last_payment_amount: amount,
        last_payment_at: paid_at,
        billing_interval: Some(BillingInterval::Single),
        payment_completed: paid,
        refunded: !invoice.issued_credit_notes.is_empty(),
        ..IntermediateFields::new(invoice.id, invoice.status)
    }
}

fn map_subscription(sub: ChargebeeSubscription) -> IntermediateFields {
    let start = sub
        .started_at
        .or(sub.activated_at)
        .or(sub.created_at)
        .unwrap_or_default();
    let status = sub.status.to_ascii_lowercase();
    let trialing = status == "in_trial";

    // Read regardless of current state so a past trial still counts as claimed.
    let trial_window = TrialWindow::from_bounds(sub.trial_start, sub.trial_end);

    let activated = sub.activated_at.is_some() || (!trialing && sub.current_term_start.is_some());
    let term_start = sub.current_term_start.unwrap_or(start);

    let (mut amount, mut paid_at) = if activated {
        (minor_to_major(sub.recurring_amount()), term_start)
    } else {
        (0.0, Timestamp::epoch())
    };

    // Cancelled exactly at trial end: the trial never converted.
    if sub.cancelled_at.is_some() && sub.cancelled_at == sub.trial_end {
        amount = 0.0;
        paid_at = Timestamp::epoch();
    }

    let status_override = (sub.total_dues > 0 && matches!(status.as_str(), "active" | "in_trial"))
        .then_some(StatusOverride::OutstandingDues(sub.total_dues));

    IntermediateFields {
        start,
        period_reference: term_start,
        cancelled: sub.cancelled_at,
        last_payment_amount: amount,
        last_payment_at: paid_at,
        billing_interval: BillingInterval::from_unit(&sub.billing_period_unit),
        trial_window,
        status_override,
        trialing,
        payment_completed: amount > 0.0,
        ..IntermediateFields::new(sub.id, sub.status)
    }
}
