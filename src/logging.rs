//! Logging setup
//!
//! Installs a global `tracing` subscriber writing to stderr in either compact
//! or JSON form.

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{ClimateError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the filter: `--debug` wins, then `RUST_LOG`, then the configured level
pub fn build_filter(config: &LoggingConfig, debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    }
}

/// Initialize logging with the given configuration
pub fn init_logging(config: &LoggingConfig, debug: bool) -> Result<()> {
    let filter = build_filter(config, debug);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| ClimateError::config(format!("Failed to initialize logging: {e}")))
}
