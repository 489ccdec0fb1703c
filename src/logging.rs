//! Structured logging setup
//!
//! Logs go to stderr so that command output on stdout stays machine-readable.

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::SkycastError;
use crate::Result;

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("skycast={}", config.level)))
        .map_err(|e| SkycastError::config(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
        _ => registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init(),
    };

    result.map_err(|e| SkycastError::config(format!("Logging already initialized: {e}")))
}
