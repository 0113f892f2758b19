//! Outbound event
//!
//! The JSON record sent to the broker. Field order is fixed so the encoded
//! payload is byte-stable for a given input and timestamp.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::invocation::InvocationConfig;
use crate::error::ClogError;

/// Immutable event built from an [`InvocationConfig`].
///
/// Optional fields are omitted from the JSON entirely when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEvent {
    /// Subject the event is published to.
    pub event: String,
    /// RFC 3339 UTC timestamp taken at build time.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_num: Option<String>,
}

impl OutboundEvent {
    /// Build the event, stamping it with the current UTC time.
    #[must_use]
    pub fn build(config: &InvocationConfig) -> Self {
        Self::build_at(config, Utc::now())
    }

    /// Build the event with an explicit timestamp.
    #[must_use]
    pub fn build_at(config: &InvocationConfig, at: DateTime<Utc>) -> Self {
        Self {
            event: config.subject().to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            session_id: config.session_id.clone(),
            message: config.message.clone(),
            user_prompt: config.user_prompt.clone(),
            state: config.state.clone(),
            task_num: config.task_num.clone(),
        }
    }

    /// Encode to the wire payload.
    pub fn to_payload(&self) -> Result<Vec<u8>, ClogError> {
        Ok(serde_json::to_vec(self)?)
    }
}
