//! Business-rule constants applied during resolution.

/// Tunable business rules. `Default` reproduces production policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// Fixed trial length that overrides provider-declared trial lengths.
    pub trial_window_days: i64,

    /// Years added to the period reference of an active, non-trial subscription.
    pub active_grace_years: u32,

    /// Months added on top of `active_grace_years`, slack for providers
    /// that refresh period fields late.
    pub active_grace_months: u32,

    /// Replacement for `details.message` when redaction is requested.
    pub redaction_token: String,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            trial_window_days: 14,
            active_grace_years: 1,
            active_grace_months: 2,
            redaction_token: "[redacted]".to_string(),
        }
    }
}
