//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! and an optional file using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `SUBSCRIPTION_RESOLVER` prefix and nested values use double
//! underscores as separators. Every value has a default, so an empty environment
//! yields the production business rules.
//!
//! # Example
//!
//! ```no_run
//! use subscription_resolver::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Trial window: {} days", config.resolver.trial_window_days);
//! ```

mod error;
mod resolver;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use resolver::ResolverConfig;
pub use telemetry::TelemetryConfig;

use std::path::Path;

use serde::Deserialize;

const ENV_PREFIX: &str = "SUBSCRIPTION_RESOLVER";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Business rules (trial window, grace window, redaction token)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Log output settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SUBSCRIPTION_RESOLVER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SUBSCRIPTION_RESOLVER__RESOLVER__TRIAL_WINDOW_DAYS=7` -> `resolver.trial_window_days = 7`
    /// - `SUBSCRIPTION_RESOLVER__TELEMETRY__JSON=true` -> `telemetry.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Load configuration from a file, with environment variables layered on top
    ///
    /// The format follows the file extension (`.toml`, `.json`, `.yaml`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.resolver.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
