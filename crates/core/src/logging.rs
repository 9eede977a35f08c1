//! Process-wide tracing subscriber setup

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{CoreError, CoreResult};
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter for `config`. `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> CoreResult<EnvFilter> {
    let directive = config.env_filter.as_deref().unwrap_or(&config.level);
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .map_err(|e| CoreError::logging(e.to_string()))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> CoreResult<()> {
    let filter = build_filter(config)?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).pretty())
            .try_init(),
        LogFormat::Plain => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr))
            .try_init(),
    };
    result.map_err(|e| CoreError::logging(e.to_string()))?;

    tracing::debug!(
        target: "gems::logging",
        level = %config.level,
        format = ?config.format,
        "logging initialized"
    );
    Ok(())
}
