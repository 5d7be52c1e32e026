use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use tbtc_btc_spv::EpochDifficulty;
use tbtc_deposit::DepositParams;
use thiserror::Error;

/// Default filter directive when neither the config nor `RUST_LOG` set one.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] io::Error),

    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Trusted Bitcoin difficulty, as a relay would report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtcConfig {
    pub current_epoch_difficulty: u64,
    pub previous_epoch_difficulty: u64,
}

impl BtcConfig {
    pub fn epoch_difficulty(&self) -> EpochDifficulty {
        EpochDifficulty {
            current: self.current_epoch_difficulty,
            previous: self.previous_epoch_difficulty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Use JSON format for logs instead of compact format.
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json_format: false,
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub btc: BtcConfig,

    /// Deposit timeouts and proof policy; every field has a default.
    #[serde(default)]
    pub deposit: DepositParams,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
