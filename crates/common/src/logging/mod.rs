//! Logging subsystem.

pub mod manager;
pub mod types;


pub use manager::init;
pub use types::{LoggerConfig, StdoutConfig};
