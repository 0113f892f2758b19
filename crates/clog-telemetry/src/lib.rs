//! # Clog Telemetry
//!
//! Diagnostic logging for the clog CLI.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clog_telemetry::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env();
//! if let Err(e) = init_logging(&config) {
//!     eprintln!("Warning: {e}");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CLOG_LOG_LEVEL` | `off` | Log filter, takes precedence over `RUST_LOG` |
//! | `RUST_LOG` | - | Fallback log filter |
//! | `CLOG_JSON_LOGS` | `false` | Emit JSON lines instead of text |
//! | `NO_COLOR` | - | Disable ANSI colours |
//!
//! All log output goes to stderr.

mod config;
mod tracing_setup;

pub use config::{LogConfig, DEFAULT_LOG_LEVEL};
pub use tracing_setup::{env_filter, init_logging};

use thiserror::Error;

/// Logging initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {reason}")]
    Filter { directive: String, reason: String },

    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),
}
