//! PayPal field mapper.

use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{
    BillingInterval, IntermediateFields, Processor, RecordType, ResolutionError, StatusOverride,
    TrialWindow,
};
use crate::ports::{decode, MappingContext, ProviderMapper};

use super::types::{PaypalBillingCycle, PaypalOrder, PaypalSubscription};

/// Maps PayPal orders (Orders v2) and subscriptions (Billing v1).
#[derive(Debug, Clone, Copy, Default)]
pub struct PaypalMapper;

impl ProviderMapper for PaypalMapper {
    fn processor(&self) -> Processor {
        Processor::Paypal
    }

    fn map(
        &self,
        ctx: &MappingContext<'_>,
        payload: &Value,
    ) -> Result<IntermediateFields, ResolutionError> {
        match ctx.record_type() {
            RecordType::Order => {
                let order: PaypalOrder = decode(Processor::Paypal, payload)?;
                Ok(map_order(order))
            }
            RecordType::Subscription => {
                let subscription: PaypalSubscription = decode(Processor::Paypal, payload)?;
                Ok(map_subscription(subscription, ctx.today))
            }
        }
    }
}

fn map_order(order: PaypalOrder) -> IntermediateFields {
    let created = order.create_time.unwrap_or_default();

    let captures: Vec<_> = order
        .purchase_units
        .iter()
        .flat_map(|unit| unit.payments.captures.iter())
        .collect();
    let settled: Vec<_> = captures.iter().filter(|c| c.is_settled()).collect();

    let order_completed = order.status.eq_ignore_ascii_case("COMPLETED");
    let payment_completed = order_completed || !settled.is_empty();

    let refunded = captures.iter().any(|c| c.is_refunded())
        || order
            .purchase_units
            .iter()
            .any(|unit| !unit.payments.refunds.is_empty());

    let mut amount: f64 = settled.iter().map(|c| c.amount.value).sum();
    if amount == 0.0 && order_completed {
        amount = order
            .purchase_units
            .iter()
            .filter_map(|unit| unit.amount.as_ref())
            .map(|money| money.value)
            .sum();
    }

    let paid_at = settled
        .iter()
        .filter_map(|c| c.create_time)
        .max()
        .unwrap_or(created);

    IntermediateFields {
        start: created,
        period_reference: created,
        cancelled: order.create_time,
        last_payment_amount: if payment_completed { amount } else { 0.0 },
        last_payment_at: if payment_completed {
            paid_at
        } else {
            Timestamp::epoch()
        },
        billing_interval: Some(BillingInterval::Single),
        payment_completed,
        refunded,
        ..IntermediateFields::new(order.id, order.status)
    }
}

fn map_subscription(sub: PaypalSubscription, today: Timestamp) -> IntermediateFields {
    let start = sub.start_time.or(sub.create_time).unwrap_or_default();
    let billing = &sub.billing_info;

    let (last_amount, last_paid_at) = billing
        .last_payment
        .as_ref()
        .map(|p| (p.amount.value, p.time.unwrap_or_default()))
        .unwrap_or((0.0, Timestamp::epoch()));

    let cycles: &[PaypalBillingCycle] = sub
        .plan
        .as_ref()
        .map(|plan| plan.billing_cycles.as_slice())
        .unwrap_or(&[]);
    let trial_cycle = cycles.iter().find(|c| c.is_trial());
    let billing_interval = cycles
        .iter()
        .find(|c| c.is_regular())
        .and_then(|c| BillingInterval::from_unit(&c.frequency.interval_unit));

    let regular_cycles_completed: u32 = billing
        .cycle_executions
        .iter()
        .filter(|e| e.tenure_type.eq_ignore_ascii_case("REGULAR"))
        .fold(0u32, |total, e| total.saturating_add(e.cycles_completed));
    let has_free_trial = match trial_cycle {
        Some(cycle) => cycle.is_free(),
        None => billing
            .cycle_executions
            .iter()
            .any(|e| e.tenure_type.eq_ignore_ascii_case("TRIAL")),
    };

    // PayPal keeps calling it a trial after the first charge; a payment wins.
    let trialing = regular_cycles_completed == 0 && has_free_trial;
    let trial_superseded = trialing && last_amount > 0.0;

    let declared_trial_days = trial_cycle.and_then(declared_length_days);
    let trial_end = match declared_trial_days {
        Some(days) => Some(start.add_days(days)),
        None if trialing => billing.next_billing_time,
        None => None,
    };
    let trial_window = if start.is_epoch() {
        None
    } else {
        TrialWindow::from_bounds(Some(start), trial_end)
    };

    let is_active = sub.status.eq_ignore_ascii_case("ACTIVE");
    let status_override = grace_violation(trialing && !trial_superseded, start, declared_trial_days, today)
        .or_else(|| {
            (is_active && billing.failed_payments_count > 0)
                .then_some(StatusOverride::FailedPayments(billing.failed_payments_count))
        });

    let cancelled = matches!(
        sub.status.to_ascii_uppercase().as_str(),
        "CANCELLED" | "EXPIRED" | "SUSPENDED"
    )
    .then_some(sub.status_update_time)
    .flatten();

    let period_reference = if last_paid_at.is_epoch() {
        start
    } else {
        last_paid_at
    };

    IntermediateFields {
        start,
        period_reference,
        cancelled,
        last_payment_amount: last_amount,
        last_payment_at: last_paid_at,
        billing_interval,
        trial_window,
        declared_trial_end: billing.next_billing_time,
        status_override,
        trialing,
        trial_superseded,
        payment_completed: last_amount > 0.0,
        refunded: false,
        ..IntermediateFields::new(sub.id, sub.status)
    }
}

/// Declared trial length in days from the plan's TRIAL cycle.
fn declared_length_days(cycle: &PaypalBillingCycle) -> Option<i64> {
    let unit = BillingInterval::from_unit(&cycle.frequency.interval_unit)?;
    let days = unit
        .days_for(cycle.frequency.interval_count)
        .checked_mul(i64::from(cycle.total_cycles.max(1)))?;
    (days > 0).then_some(days)
}

/// Still nominally trialing after the declared trial length has elapsed.
fn grace_violation(
    unpaid_trial: bool,
    start: Timestamp,
    declared_days: Option<i64>,
    today: Timestamp,
) -> Option<StatusOverride> {
    let declared_days = declared_days?;
    if !unpaid_trial || start.is_epoch() {
        return None;
    }
    let elapsed = today.days_since(&start);
    (elapsed > declared_days as f64).then(|| StatusOverride::TrialGraceViolation {
        days_since_start: elapsed.floor() as i64,
    })
}
