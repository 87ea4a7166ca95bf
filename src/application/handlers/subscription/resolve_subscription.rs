//! SubscriptionResolver - Resolves a provider payload into canonical state.
//!
//! Threads the pipeline: envelope → detector → mapper → classifier →
//! trial → grace rules → assembler. Every stage returns a new value and
//! nothing is shared between calls, so one resolver can serve any number
//! of threads.

use serde_json::Value;

use crate::adapters::mapper_for;
use crate::config::{ResolverConfig, ValidationError};
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{
    assemble, classify, detect, resolve_billing_interval, resolve_expiration, resolve_trial,
    unwrap_envelope, CanonicalSubscriptionState, GraceInputs, OutputFlags, ResolutionError,
    ResolutionPolicy, ResolutionProfile,
};
use crate::ports::MappingContext;

/// Per-call options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Reference instant. Defaults to the current time; set it for replay.
    pub today: Option<Timestamp>,

    /// Include `processor` in the output.
    pub resolve_processor: bool,

    /// Include `recordType` in the output.
    pub resolve_type: bool,

    /// Replace `details.message` with the redaction token.
    pub redact_message: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            today: None,
            resolve_processor: true,
            resolve_type: true,
            redact_message: false,
        }
    }
}

impl ResolveOptions {
    pub fn at(today: Timestamp) -> Self {
        Self {
            today: Some(today),
            ..Self::default()
        }
    }

    pub fn redacted(mut self) -> Self {
        self.redact_message = true;
        self
    }

    fn flags(&self) -> OutputFlags {
        OutputFlags {
            resolve_processor: self.resolve_processor,
            resolve_type: self.resolve_type,
            redact_message: self.redact_message,
        }
    }
}

/// Result of a successful resolution.
pub type ResolveSubscriptionResult = CanonicalSubscriptionState;

/// Resolves provider payloads under one resolution policy.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionResolver {
    policy: ResolutionPolicy,
}

impl SubscriptionResolver {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self { policy }
    }

    /// Builds a resolver from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the configured policy is out of range.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self::new(config.to_policy()))
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Resolves a bare resource or a full webhook body.
    pub fn resolve(
        &self,
        payload: &Value,
        profile: &ResolutionProfile,
        options: &ResolveOptions,
    ) -> Result<ResolveSubscriptionResult, ResolutionError> {
        let today = options.today.unwrap_or_else(Timestamp::now);
        let resource = unwrap_envelope(payload);

        let detected = detect(profile, resource)?;
        let ctx = MappingContext::new(&detected, today);
        let fields = mapper_for(detected.processor).map(&ctx, resource)?;

        if fields.status_token.trim().is_empty() {
            tracing::warn!(
                processor = %detected.processor,
                external_id = %fields.external_id,
                "Provider payload has an empty status"
            );
            return Err(ResolutionError::mapper_fault(
                detected.processor,
                "missing status token",
            ));
        }

        let interval = resolve_billing_interval(&detected, &fields)?;

        let classification = classify(
            detected.processor,
            detected.record_type,
            &fields.status_token,
            fields.status_override,
        );
        let trial = resolve_trial(
            detected.processor,
            &fields,
            classification.status,
            today,
            &self.policy,
        );
        let expiration = resolve_expiration(
            classification,
            GraceInputs {
                fields: &fields,
                interval,
                trial: &trial,
                authorization_failed: detected.authorization_failed(),
            },
            &self.policy,
        );

        let state = assemble(
            &detected,
            fields,
            interval,
            trial,
            expiration,
            options.flags(),
            &self.policy,
        );

        tracing::debug!(
            processor = %detected.processor,
            record_type = %detected.record_type,
            external_id = %state.external_resource_id,
            status = %state.status,
            expires = %state.expires.timestamp,
            "Resolved subscription state"
        );

        Ok(state)
    }

    /// Parses a raw request body, then resolves it.
    pub fn resolve_bytes(
        &self,
        body: &[u8],
        profile: &ResolutionProfile,
        options: &ResolveOptions,
    ) -> Result<ResolveSubscriptionResult, ResolutionError> {
        let payload: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, "Rejected non-JSON payload");
            ResolutionError::malformed_payload(e.to_string())
        })?;
        self.resolve(&payload, profile, options)
    }
}

/// Resolves with the default policy.
pub fn resolve_subscription(
    payload: &Value,
    profile: &ResolutionProfile,
    options: &ResolveOptions,
) -> Result<ResolveSubscriptionResult, ResolutionError> {
    SubscriptionResolver::default().resolve(payload, profile, options)
}

/// Parses and resolves a raw body with the default policy.
pub fn resolve_subscription_bytes(
    body: &[u8],
    profile: &ResolutionProfile,
    options: &ResolveOptions,
) -> Result<ResolveSubscriptionResult, ResolutionError> {
    SubscriptionResolver::default().resolve_bytes(body, profile, options)
}
