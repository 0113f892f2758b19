//! Invocation configuration
//!
//! One per run. Built from raw flag values and validated before anything
//! touches the network.
//!
//! # Example
//!
//! ```ignore
//! use clog_publisher::domain::InvocationConfig;
//!
//! let config = InvocationConfig::new("task", "Adding VAT breakdown")?
//!     .with_state("in_progress")
//!     .with_task_num("3/15")
//!     .with_session("nye-api");
//! ```

use super::event_type::EventType;
use crate::error::ClogError;

/// Validated flag values for a single run
///
/// Optional fields hold `None` rather than an empty string, so an empty
/// flag and a missing flag are indistinguishable downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationConfig {
    /// Event type (closed set).
    pub event_type: EventType,
    /// Free-text message. Never empty.
    pub message: String,
    /// Optional state, e.g. `in_progress`.
    pub state: Option<String>,
    /// Optional task progress label, e.g. `3/15`.
    pub task_num: Option<String>,
    /// Optional session identifier.
    pub session_id: Option<String>,
    /// Optional verbatim user prompt.
    pub user_prompt: Option<String>,
}

impl InvocationConfig {
    /// Validate the required fields and build a config with no optionals set.
    ///
    /// Rejects an empty type or message, then any type outside the closed set.
    pub fn new(event_type: &str, message: &str) -> Result<Self, ClogError> {
        if event_type.is_empty() || message.is_empty() {
            return Err(ClogError::InvalidArguments(
                "-type and -message are required".to_string(),
            ));
        }

        Ok(Self {
            event_type: event_type.parse()?,
            message: message.to_string(),
            state: None,
            task_num: None,
            session_id: None,
            user_prompt: None,
        })
    }

    /// Builder-style method to set the state
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_empty(state.into());
        self
    }

    /// Builder-style method to set the task progress label
    pub fn with_task_num(mut self, task_num: impl Into<String>) -> Self {
        self.task_num = non_empty(task_num.into());
        self
    }

    /// Builder-style method to set the session identifier
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = non_empty(session_id.into());
        self
    }

    /// Builder-style method to set the user prompt
    pub fn with_user_prompt(mut self, user_prompt: impl Into<String>) -> Self {
        self.user_prompt = non_empty(user_prompt.into());
        self
    }

    /// Subject this invocation publishes to.
    #[must_use]
    pub fn subject(&self) -> &'static str {
        super::subject::map_subject(self.event_type, self.state.as_deref())
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
