//! Resolver business-rule configuration

use serde::Deserialize;

use crate::domain::subscription::ResolutionPolicy;

use super::error::ValidationError;

/// Business rules applied during subscription resolution
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Fixed trial length in days, overriding provider-declared lengths
    #[serde(default = "default_trial_window_days")]
    pub trial_window_days: i64,

    /// Years added to the period reference of an active paid subscription
    #[serde(default = "default_active_grace_years")]
    pub active_grace_years: u32,

    /// Extra months on top of `active_grace_years`
    #[serde(default = "default_active_grace_months")]
    pub active_grace_months: u32,

    /// Replacement for `details.message` when redaction is requested
    #[serde(default = "default_redaction_token")]
    pub redaction_token: String,
}

impl ResolverConfig {
    /// Validate resolver configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=365).contains(&self.trial_window_days) {
            return Err(ValidationError::InvalidTrialWindow(self.trial_window_days));
        }
        let grace_months =
            u64::from(self.active_grace_years) * 12 + u64::from(self.active_grace_months);
        if !(1..=60).contains(&grace_months) {
            return Err(ValidationError::InvalidGraceWindow);
        }
        if self.redaction_token.trim().is_empty() {
            return Err(ValidationError::EmptyRedactionToken);
        }
        Ok(())
    }

    /// The policy the resolver applies
    pub fn to_policy(&self) -> ResolutionPolicy {
        ResolutionPolicy {
            trial_window_days: self.trial_window_days,
            active_grace_years: self.active_grace_years,
            active_grace_months: self.active_grace_months,
            redaction_token: self.redaction_token.clone(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            trial_window_days: default_trial_window_days(),
            active_grace_years: default_active_grace_years(),
            active_grace_months: default_active_grace_months(),
            redaction_token: default_redaction_token(),
        }
    }
}

fn default_trial_window_days() -> i64 {
    14
}

fn default_active_grace_years() -> u32 {
    1
}

fn default_active_grace_months() -> u32 {
    2
}

fn default_redaction_token() -> String {
    "[redacted]".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.trial_window_days, 14);
        assert_eq!(config.active_grace_years, 1);
        assert_eq!(config.active_grace_months, 2);
        assert_eq!(config.to_policy(), ResolutionPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_trial_window() {
        let config = ResolverConfig {
            trial_window_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTrialWindow(0)));

        let config = ResolverConfig {
            trial_window_days: 400,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_grace_window() {
        let config = ResolverConfig {
            active_grace_years: 0,
            active_grace_months: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidGraceWindow));

        let config = ResolverConfig {
            active_grace_years: 10,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidGraceWindow));
    }

    #[test]
    fn test_validation_empty_redaction_token() {
        let config = ResolverConfig {
            redaction_token: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyRedactionToken));
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: ResolverConfig = serde_json::from_str(r#"{"trial_window_days": 7}"#).unwrap();
        assert_eq!(config.trial_window_days, 7);
        assert_eq!(config.redaction_token, "[redacted]");
    }
}
