//! Event types accepted by clog
//!
//! The set is closed: anything outside these four values is rejected
//! before a connection is attempted.

use std::fmt;
use std::str::FromStr;

use crate::error::ClogError;

/// Kind of event being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Work item lifecycle (started, completed, blocked).
    Task,
    /// A question for the user, optionally blocking.
    Question,
    /// Free-form progress update.
    Progress,
    /// Session start/end.
    Session,
}

impl EventType {
    /// Every accepted event type, in help-text order.
    pub const ALL: [EventType; 4] = [Self::Task, Self::Question, Self::Progress, Self::Session];

    /// Wire/CLI spelling of this type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Question => "question",
            Self::Progress => "progress",
            Self::Session => "session",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ClogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ClogError::InvalidArguments(format!(
                    "invalid type '{s}'. Must be: task|question|progress|session"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_types_parse() {
        for name in ["task", "question", "progress", "session"] {
            let parsed: EventType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_display_matches_cli_spelling() {
        let shown: Vec<String> = EventType::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["task", "question", "progress", "session"]);
    }

    #[test]
    fn test_unknown_types_rejected() {
        for name in ["invalid", "foo", "bar", "", "Task", "tasks"] {
            let err = name.parse::<EventType>().unwrap_err();
            assert!(matches!(err, ClogError::InvalidArguments(_)), "{name}");
        }
    }

    #[test]
    fn test_rejection_names_the_value() {
        let err = "deploy".parse::<EventType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type 'deploy'. Must be: task|question|progress|session"
        );
    }
}
