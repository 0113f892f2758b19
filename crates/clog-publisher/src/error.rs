//! Error types for the clog publisher
//!
//! Every error is terminal for the run. The variant decides the exit code.

use std::fmt;
use thiserror::Error;

/// Exit code for a successful publish (and for help/version output).
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for invalid arguments or a payload that failed to encode.
pub const EXIT_INVALID_ARGS: u8 = 1;
/// Exit code for broker connection, publish or flush failures.
pub const EXIT_CONNECTION_ERROR: u8 = 2;

/// Errors that can end a clog run
#[derive(Debug, Error)]
pub enum ClogError {
    #[error("{0}")]
    InvalidArguments(String),

    #[error("failed to marshal JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{stage} failed{}: {detail}", subject_suffix(.subject))]
    Connection {
        stage: ConnectionStage,
        subject: Option<String>,
        detail: String,
    },
}

impl ClogError {
    /// Build a connection error that is not tied to a subject.
    pub fn connection(stage: ConnectionStage, detail: impl fmt::Display) -> Self {
        Self::Connection {
            stage,
            subject: None,
            detail: detail.to_string(),
        }
    }

    /// Build a connection error for a stage that targets `subject`.
    pub fn on_subject(
        stage: ConnectionStage,
        subject: impl Into<String>,
        detail: impl fmt::Display,
    ) -> Self {
        Self::Connection {
            stage,
            subject: Some(subject.into()),
            detail: detail.to_string(),
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArguments(_) | Self::Serialization(_) => EXIT_INVALID_ARGS,
            Self::Connection { .. } => EXIT_CONNECTION_ERROR,
        }
    }

    /// The failing connection stage, if this is a connection error.
    #[must_use]
    pub fn stage(&self) -> Option<ConnectionStage> {
        match self {
            Self::Connection { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

fn subject_suffix(subject: &Option<String>) -> String {
    subject
        .as_deref()
        .map(|s| format!(" for subject '{s}'"))
        .unwrap_or_default()
}

/// Where in the broker round-trip a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStage {
    /// Loading or decoding credential material.
    Credentials,
    /// Opening the connection to the broker.
    Connect,
    /// Handing the message to the client.
    Publish,
    /// Flushing the outbound buffer.
    Flush,
    /// The outbound buffer was not written out in time.
    FlushTimeout,
}

impl ConnectionStage {
    /// Stable name used in logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
            Self::Connect => "connect",
            Self::Publish => "publish",
            Self::Flush => "flush",
            Self::FlushTimeout => "flush-timeout",
        }
    }
}

impl fmt::Display for ConnectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(EXIT_SUCCESS, 0);
        assert_eq!(EXIT_INVALID_ARGS, 1);
        assert_eq!(EXIT_CONNECTION_ERROR, 2);
    }

    #[test]
    fn test_error_exit_code_mapping() {
        let invalid = ClogError::InvalidArguments("-type and -message are required".into());
        assert_eq!(invalid.exit_code(), EXIT_INVALID_ARGS);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ClogError::from(json_err).exit_code(), EXIT_INVALID_ARGS);

        let conn = ClogError::connection(ConnectionStage::Connect, "connection refused");
        assert_eq!(conn.exit_code(), EXIT_CONNECTION_ERROR);
    }

    #[test]
    fn test_connection_error_names_stage_and_subject() {
        let err = ClogError::on_subject(
            ConnectionStage::Publish,
            "claude.tasks.started",
            "outbound buffer full",
        );
        assert_eq!(
            err.to_string(),
            "publish failed for subject 'claude.tasks.started': outbound buffer full"
        );
        assert_eq!(err.stage(), Some(ConnectionStage::Publish));

        let err = ClogError::connection(ConnectionStage::Connect, "connection refused");
        assert_eq!(err.to_string(), "connect failed: connection refused");
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(ConnectionStage::FlushTimeout.to_string(), "flush-timeout");
        assert_eq!(ConnectionStage::Credentials.as_str(), "credentials");
    }
}
