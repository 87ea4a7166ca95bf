//! Webhook envelope unwrapping.
//!
//! Providers deliver the billing resource wrapped in an event envelope.
//! Callers may hand the engine either the bare resource or the full webhook
//! body; this strips the envelope so detection sees the resource itself.

use serde_json::Value;

/// Returns the billing resource embedded in a webhook envelope.
///
/// Payloads that are not a recognised envelope are returned unchanged.
pub fn unwrap_envelope(payload: &Value) -> &Value {
    // Stripe: {"object": "event", "data": {"object": {...}}}
    if payload.get("object").and_then(Value::as_str) == Some("event") {
        if let Some(resource) = payload.pointer("/data/object").filter(|v| v.is_object()) {
            return resource;
        }
    }

    // PayPal: {"event_type": "...", "resource": {...}}
    if payload.get("event_type").is_some() {
        if let Some(resource) = payload.get("resource").filter(|v| v.is_object()) {
            return resource;
        }
    }

    // Chargebee: {"event_type": "...", "content": {"subscription": {...}}}
    if let Some(content) = payload.get("content").filter(|v| v.is_object()) {
        if let Some(resource) = content
            .get("subscription")
            .or_else(|| content.get("invoice"))
            .filter(|v| v.is_object())
        {
            return resource;
        }
    }

    // Coinbase Commerce: {"event": {"type": "...", "data": {...}}}
    if let Some(resource) = payload.pointer("/event/data").filter(|v| v.is_object()) {
        return resource;
    }

    payload
}
