//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; hosts that want them printed
//! call [`init_tracing`] once at startup.

use std::io;

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` wins over the configured `log_level`. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    if config.json {
        builder.json().finish().try_init()
    } else {
        builder.finish().try_init()
    }
}
