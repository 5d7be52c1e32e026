//! Logging initialization.

use std::env;

use tracing::*;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use super::types::LoggerConfig;

/// Initializes the logging subsystem with the provided config.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LoggerConfig) -> Result<(), TryInitError> {
    let env_directive = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filt = build_filter(&config.filter, env_directive.as_deref());

    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_span_events(config.stdout_config.fmt_span)
            .with_filter(filt)
            .boxed()
    } else {
        layer()
            .compact()
            .with_span_events(config.stdout_config.fmt_span)
            .with_filter(filt)
            .boxed()
    };

    tracing_subscriber::registry().with(stdout_sub).try_init()?;

    info!(service_name = %config.service_name, "logging initialized");
    Ok(())
}

/// `RUST_LOG` wins when set and non-empty, otherwise `fallback` applies.
/// Unparsable directives are dropped.
pub(crate) fn build_filter(fallback: &str, env_directive: Option<&str>) -> EnvFilter {
    match env_directive {
        Some(d) if !d.trim().is_empty() => EnvFilter::new(d),
        _ => EnvFilter::new(fallback),
    }
}
