//! Payment processors and the record types they emit.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Billing provider a payload originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Processor {
    Paypal,
    Chargebee,
    Stripe,
    Coinbase,
}

impl Processor {
    pub const ALL: [Processor; 4] = [
        Processor::Paypal,
        Processor::Chargebee,
        Processor::Stripe,
        Processor::Coinbase,
    ];

    /// Returns the wire name (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Processor::Paypal => "paypal",
            Processor::Chargebee => "chargebee",
            Processor::Stripe => "stripe",
            Processor::Coinbase => "coinbase",
        }
    }

    /// Returns the display name for this processor.
    pub fn display_name(&self) -> &'static str {
        match self {
            Processor::Paypal => "PayPal",
            Processor::Chargebee => "Chargebee",
            Processor::Stripe => "Stripe",
            Processor::Coinbase => "Coinbase",
        }
    }
}

impl std::fmt::Display for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Processor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("processor"));
        }
        Processor::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "processor",
                    format!("unsupported value '{}'", trimmed),
                )
            })
    }
}

/// Shape of the billing record: a one-time order or a recurring subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Order,
    #[default]
    Subscription,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Order => "order",
            RecordType::Subscription => "subscription",
        }
    }

    pub fn is_order(&self) -> bool {
        matches!(self, RecordType::Order)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "order" => Ok(RecordType::Order),
            "subscription" => Ok(RecordType::Subscription),
            "" => Err(ValidationError::empty_field("record_type")),
            other => Err(ValidationError::invalid_format(
                "record_type",
                format!("unsupported value '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processor_parses_case_insensitively() {
        assert_eq!("PayPal".parse::<Processor>(), Ok(Processor::Paypal));
        assert_eq!(" stripe ".parse::<Processor>(), Ok(Processor::Stripe));
        assert_eq!("COINBASE".parse::<Processor>(), Ok(Processor::Coinbase));
    }

    #[test]
    fn processor_rejects_unknown_and_empty() {
        assert!(matches!(
            "square".parse::<Processor>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            "".parse::<Processor>(),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn processor_serializes_lowercase() {
        let json = serde_json::to_string(&Processor::Chargebee).unwrap();
        assert_eq!(json, "\"chargebee\"");
    }

    #[test]
    fn record_type_defaults_to_subscription() {
        assert_eq!(RecordType::default(), RecordType::Subscription);
        assert!(RecordType::Order.is_order());
        assert!(!RecordType::Subscription.is_order());
    }

    #[test]
    fn record_type_parses() {
        assert_eq!("Order".parse::<RecordType>(), Ok(RecordType::Order));
        assert!("invoice".parse::<RecordType>().is_err());
    }
}
