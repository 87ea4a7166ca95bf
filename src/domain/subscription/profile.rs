//! Caller-supplied resolution hints.

use serde::{Deserialize, Serialize};

use super::{AuthorizationStatus, BillingInterval, Processor, RecordType};

/// Hints the caller knows about a payload.
///
/// Every field is optional. The detector fills `processor` and `record_type`
/// from the payload when absent; Coinbase payloads need `record_type` and
/// `billing_interval` from here since the charge object carries neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionProfile {
    #[serde(default)]
    pub processor: Option<Processor>,

    #[serde(default)]
    pub record_type: Option<RecordType>,

    #[serde(default)]
    pub billing_interval: Option<BillingInterval>,

    #[serde(default)]
    pub authorization_status: Option<AuthorizationStatus>,
}

impl ResolutionProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn with_billing_interval(mut self, interval: BillingInterval) -> Self {
        self.billing_interval = Some(interval);
        self
    }

    pub fn with_authorization_status(mut self, status: AuthorizationStatus) -> Self {
        self.authorization_status = Some(status);
        self
    }
}

/// A profile after detection: processor and record type are always known.
///
/// Lives for a single resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedProfile {
    pub processor: Processor,
    pub record_type: RecordType,
    pub billing_interval: Option<BillingInterval>,
    pub authorization_status: Option<AuthorizationStatus>,
}

impl DetectedProfile {
    pub fn authorization_failed(&self) -> bool {
        self.authorization_status
            .map(|status| status.is_failed())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_deserializes_camel_case_hints() {
        let json = r#"{
            "processor": "coinbase",
            "recordType": "subscription",
            "billingInterval": "monthly",
            "authorizationStatus": "failed"
        }"#;

        let profile: ResolutionProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.processor, Some(Processor::Coinbase));
        assert_eq!(profile.record_type, Some(RecordType::Subscription));
        assert_eq!(profile.billing_interval, Some(BillingInterval::Monthly));
        assert_eq!(profile.authorization_status, Some(AuthorizationStatus::Failed));
    }

    #[test]
    fn empty_profile_deserializes() {
        let profile: ResolutionProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, ResolutionProfile::default());
    }

    #[test]
    fn builder_sets_fields() {
        let profile = ResolutionProfile::new()
            .with_processor(Processor::Stripe)
            .with_record_type(RecordType::Order);

        assert_eq!(profile.processor, Some(Processor::Stripe));
        assert_eq!(profile.record_type, Some(RecordType::Order));
        assert_eq!(profile.billing_interval, None);
    }

    #[test]
    fn authorization_failed_only_for_failed() {
        let detected = DetectedProfile {
            processor: Processor::Stripe,
            record_type: RecordType::Subscription,
            billing_interval: None,
            authorization_status: Some(AuthorizationStatus::Failed),
        };
        assert!(detected.authorization_failed());

        let detected = DetectedProfile {
            authorization_status: None,
            ..detected
        };
        assert!(!detected.authorization_failed());
    }
}
