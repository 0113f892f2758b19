//! Log configuration from environment variables.

use std::env;

/// Level used when neither `CLOG_LOG_LEVEL` nor `RUST_LOG` is set.
///
/// Failures are already reported once on stderr by the CLI, so diagnostics
/// are opt-in.
pub const DEFAULT_LOG_LEVEL: &str = "off";

/// Configuration for diagnostic logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive (trace, debug, info, warn, error, or `target=level` list)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to colour the human-readable output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CLOG_LOG_LEVEL` or `RUST_LOG`: Log filter (default: off)
    /// - `CLOG_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `NO_COLOR`: Disable ANSI colours when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("CLOG_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),

            json_logs: lookup("CLOG_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),

            ansi: lookup("NO_COLOR").is_none(),
        }
    }
}
