//! Canonical subscription status and trial authorization status.

use serde::{Deserialize, Serialize};

/// Provider-agnostic subscription status.
///
/// Every provider state machine collapses into one of these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Paid up or legitimately trialing. Grants access.
    Active,

    /// Payment problem or policy violation. No access until resolved.
    Suspended,

    /// Ended, never started, or a one-time purchase.
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Suspended => "suspended",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if this status can grant access (expiry still applies).
    pub fn grants_access(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the card authorization charge taken when a trial starts.
///
/// Supplied by the caller; providers do not report it in the subscription payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Pending,
    Succeeded,
    Failed,
}

impl AuthorizationStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, AuthorizationStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_grants_access() {
        assert!(SubscriptionStatus::Active.grants_access());
        assert!(!SubscriptionStatus::Suspended.grants_access());
        assert!(!SubscriptionStatus::Cancelled.grants_access());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&SubscriptionStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
    }

    #[test]
    fn status_deserializes_from_lowercase() {
        let status: SubscriptionStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, SubscriptionStatus::Cancelled);
    }

    #[test]
    fn authorization_failed_is_detected() {
        assert!(AuthorizationStatus::Failed.is_failed());
        assert!(!AuthorizationStatus::Succeeded.is_failed());
        assert!(!AuthorizationStatus::Pending.is_failed());
    }
}
