//! Status classification.
//!
//! Each processor owns a table from its native status tokens to the
//! canonical status. Provider overrides are applied after the lookup and
//! always win. Unknown tokens deny access.

use super::{Processor, RecordType, StatusOverride, SubscriptionStatus};

/// Classifier output: the status plus a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: SubscriptionStatus,
    pub message: String,
}

/// Table lookup for a provider status token. `None` means the token is unknown.
pub fn lookup(
    processor: Processor,
    record_type: RecordType,
    token: &str,
) -> Option<SubscriptionStatus> {
    use SubscriptionStatus::*;

    // One-time purchases never carry an ongoing entitlement, and Coinbase
    // charges are one-time regardless of how the caller labels them.
    if record_type.is_order() || processor == Processor::Coinbase {
        return Some(Cancelled);
    }

    let token = token.trim().to_ascii_lowercase();
    match processor {
        Processor::Paypal => match token.as_str() {
            "active" => Some(Active),
            "suspended" => Some(Suspended),
            "cancelled" | "expired" | "approval_pending" | "approved" => Some(Cancelled),
            _ => None,
        },
        Processor::Chargebee => match token.as_str() {
            "active" | "in_trial" | "non_renewing" => Some(Active),
            "paused" | "future" => Some(Suspended),
            "cancelled" => Some(Cancelled),
            _ => None,
        },
        Processor::Stripe => match token.as_str() {
            "active" | "trialing" => Some(Active),
            "past_due" | "unpaid" | "incomplete" | "paused" => Some(Suspended),
            "canceled" | "incomplete_expired" => Some(Cancelled),
            _ => None,
        },
        Processor::Coinbase => Some(Cancelled),
    }
}

/// Classifies a provider status token, then applies any override.
pub fn classify(
    processor: Processor,
    record_type: RecordType,
    token: &str,
    status_override: Option<StatusOverride>,
) -> Classification {
    let base = match lookup(processor, record_type, token) {
        Some(status) => Classification {
            status,
            message: format!(
                "{} {} status '{}' resolved to {}",
                processor.display_name(),
                record_type,
                token,
                status
            ),
        },
        None => {
            tracing::warn!(
                processor = %processor,
                status_token = token,
                "Unknown provider status token, treating as cancelled"
            );
            Classification {
                status: SubscriptionStatus::Cancelled,
                message: format!(
                    "{} {} status '{}' is not recognised; treated as cancelled",
                    processor.display_name(),
                    record_type,
                    token
                ),
            }
        }
    };

    match status_override {
        None => base,
        Some(status_override) => {
            tracing::debug!(
                processor = %processor,
                status_token = token,
                ?status_override,
                "Provider override forces suspension"
            );
            Classification {
                status: SubscriptionStatus::Suspended,
                message: override_message(status_override),
            }
        }
    }
}

fn override_message(status_override: StatusOverride) -> String {
    match status_override {
        StatusOverride::FailedPayments(count) => {
            format!("Suspended after {} failed payment(s)", count)
        }
        StatusOverride::OutstandingDues(minor_units) => format!(
            "Suspended with outstanding dues of {:.2}",
            minor_units as f64 / 100.0
        ),
        StatusOverride::TrialGraceViolation { days_since_start } => format!(
            "Suspended: still trialing {} day(s) after start without converting",
            days_since_start
        ),
    }
}
