//! Subject mapping
//!
//! Pure lookup from (event type, state) to the NATS subject. States that are
//! not listed for a type fall through to that type's default subject; an
//! unknown state is never an error.

use super::event_type::EventType;

/// Task moved to `in_progress`.
pub const TASKS_STARTED: &str = "claude.tasks.started";
/// Task moved to `completed`.
pub const TASKS_COMPLETED: &str = "claude.tasks.completed";
/// Task moved to `blocked`.
pub const TASKS_BLOCKED: &str = "claude.tasks.blocked";
/// Task with no recognised state.
pub const TASKS: &str = "claude.tasks";
/// Question that blocks until the user answers.
pub const QUESTIONS_WAITING: &str = "claude.questions.waiting";
/// Non-blocking question.
pub const QUESTIONS_ASKED: &str = "claude.questions.asked";
/// Any progress update.
pub const PROGRESS_UPDATE: &str = "claude.progress.update";
/// Session finished.
pub const SESSION_COMPLETED: &str = "claude.session.completed";
/// Session started (or any other session state).
pub const SESSION_STARTED: &str = "claude.session.started";

/// Map an event type and optional state to its subject.
#[must_use]
pub fn map_subject(event_type: EventType, state: Option<&str>) -> &'static str {
    match (event_type, state.unwrap_or_default()) {
        (EventType::Task, "in_progress") => TASKS_STARTED,
        (EventType::Task, "completed") => TASKS_COMPLETED,
        (EventType::Task, "blocked") => TASKS_BLOCKED,
        (EventType::Task, _) => TASKS,
        (EventType::Question, "blocked") => QUESTIONS_WAITING,
        (EventType::Question, _) => QUESTIONS_ASKED,
        (EventType::Progress, _) => PROGRESS_UPDATE,
        (EventType::Session, "completed") => SESSION_COMPLETED,
        (EventType::Session, _) => SESSION_STARTED,
    }
}
