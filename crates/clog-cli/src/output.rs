//! Text written to stdout and stderr.

use std::fmt::Write as _;

use clog_publisher::InvocationConfig;

/// Usage text for `-h` and for invalid invocations.
pub const USAGE: &str = r#"clog - Claude Log Publisher for NATS

USAGE:
  clog -type=<event_type> -message="<text>" [options]

REQUIRED FLAGS:
  -type          Event type: task|question|progress|session
  -message       Message content (string)

OPTIONAL FLAGS:
  -state         Task state: pending|in_progress|blocked|completed
  -task-num      Current task number (e.g., "3/15")
  -session       Session identifier (any string)
  -user-prompt   The user's prompt, passed through verbatim
  -h             Show this help
  -v             Show version

FOR AI ASSISTANTS:
  Before asking the user a question, or whenever you are blocked waiting for
  their input, publish a notification first so they see it over NATS:

    1. clog -type=question -state=blocked -message="<your question>" -session="<session>"
    2. Then ask the question in the conversation as usual.

EXAMPLES:
  # Task started
  clog -type=task -state=in_progress -message="Adding VAT breakdown" -task-num="3/15" -session="nye-api"

  # Task completed
  clog -type=task -state=completed -message="VAT breakdown added" -task-num="3/15" -session="nye-api"

  # Waiting on the user
  clog -type=question -state=blocked -message="Should VAT be inclusive or exclusive?" -session="nye-api"

  # Progress update
  clog -type=progress -message="50% complete (5/10 tasks)" -session="nye-api"

  # Session finished
  clog -type=session -state=completed -message="API improvements done" -session="nye-api"

SUBJECTS:
  task      in_progress -> claude.tasks.started
            completed   -> claude.tasks.completed
            blocked     -> claude.tasks.blocked
            other       -> claude.tasks
  question  blocked     -> claude.questions.waiting
            other       -> claude.questions.asked
  progress  any         -> claude.progress.update
  session   completed   -> claude.session.completed
            other       -> claude.session.started

ENVIRONMENT:
  NATS_URL, NATS_CREDS, NATS_USERNAME + NATS_PASSWORD, NATS_TOKEN,
  NATS_NKEY, NATS_JWT + NATS_SEED (first configured source wins)

EXIT CODES:
  0 - Success
  1 - Invalid arguments
  2 - NATS connection or publish failed"#;

/// `clog <version>`
#[must_use]
pub fn version_line() -> String {
    format!("clog {}", env!("CARGO_PKG_VERSION"))
}

/// Confirmation printed after a successful publish.
#[must_use]
pub fn confirmation(config: &InvocationConfig, subject: &str) -> String {
    let mut text = format!("✓ Message published successfully to '{subject}'\n");
    let _ = writeln!(text, "  Type: {}", config.event_type);

    let optional = [
        ("State", &config.state),
        ("Task", &config.task_num),
        ("Session", &config.session_id),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(text, "  {label}: {value}");
        }
    }

    text
}
