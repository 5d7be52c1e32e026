//! Configuration types for the logging subsystem.

use tracing_subscriber::fmt::format::FmtSpan;

/// Directive applied when neither `RUST_LOG` nor the caller sets one.
pub const DEFAULT_FILTER: &str = "info";

/// Configuration for the stdout logging layer
#[derive(Debug, Clone)]
pub struct StdoutConfig {
    /// Use JSON format instead of compact format
    pub json_format: bool,
    /// Span events to log (ENTER, EXIT, CLOSE, etc.)
    pub fmt_span: FmtSpan,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            json_format: false,
            fmt_span: FmtSpan::NONE,
        }
    }
}

/// Main logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Name reported in the startup line.
    pub service_name: String,
    /// Filter directive used when `RUST_LOG` is unset or empty.
    pub filter: String,
    /// Stdout logging configuration
    pub stdout_config: StdoutConfig,
}

impl LoggerConfig {
    pub fn new(service_name: String) -> Self {
        Self {
            service_name,
            filter: DEFAULT_FILTER.to_owned(),
            stdout_config: StdoutConfig::default(),
        }
    }

    /// Set the fallback filter directive
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Enable JSON logging format
    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.stdout_config.json_format = enabled;
        self
    }

    /// Configure which span events to log
    pub fn with_fmt_span(mut self, fmt_span: FmtSpan) -> Self {
        self.stdout_config.fmt_span = fmt_span;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new("(tbtc-service)".to_owned())
    }
}
