//! TOML configuration for the deposit tooling.

mod config;

pub use config::{BtcConfig, Config, ConfigError, LoggingConfig};
