//! Command-line parsing.
//!
//! Flags are written Go-style with a single dash (`-type=task`,
//! `-task-num 3/15`). They are rewritten to clap's double-dash form before
//! parsing, so both spellings work.

use std::ffi::OsString;

use clap::{ArgAction, Parser};
use clog_publisher::{ClogError, InvocationConfig};

/// Flags that take a value.
const VALUE_FLAGS: [&str; 6] = [
    "type",
    "message",
    "state",
    "task-num",
    "session",
    "user-prompt",
];

/// Raw flag values as typed by the user.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "clog", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Event type: task|question|progress|session
    #[arg(long = "type", value_name = "EVENT_TYPE", allow_hyphen_values = true)]
    pub event_type: Option<String>,

    /// Message content
    #[arg(long, allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Task state: pending|in_progress|blocked|completed
    #[arg(long, allow_hyphen_values = true)]
    pub state: Option<String>,

    /// Current task number (e.g. "3/15")
    #[arg(long = "task-num", allow_hyphen_values = true)]
    pub task_num: Option<String>,

    /// Session identifier
    #[arg(long, allow_hyphen_values = true)]
    pub session: Option<String>,

    /// The user's prompt, verbatim
    #[arg(long = "user-prompt", allow_hyphen_values = true)]
    pub user_prompt: Option<String>,

    /// Show help
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Show version
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    pub version: bool,
}

/// What a run should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage and exit 0.
    Help,
    /// Print the version and exit 0.
    Version,
    /// Publish one event.
    Publish(InvocationConfig),
}

impl Cli {
    /// Turn parsed flags into a command, validating the publish flags.
    pub fn into_command(self) -> Result<Command, ClogError> {
        if self.help {
            return Ok(Command::Help);
        }
        if self.version {
            return Ok(Command::Version);
        }

        let config = InvocationConfig::new(
            self.event_type.as_deref().unwrap_or_default(),
            self.message.as_deref().unwrap_or_default(),
        )?
        .with_state(self.state.unwrap_or_default())
        .with_task_num(self.task_num.unwrap_or_default())
        .with_session(self.session.unwrap_or_default())
        .with_user_prompt(self.user_prompt.unwrap_or_default());

        Ok(Command::Publish(config))
    }
}

/// Parse a full argument vector, program name first.
///
/// No arguments at all means help. Any clap failure becomes
/// [`ClogError::InvalidArguments`].
pub fn parse_command<I, T>(args: I) -> Result<Command, ClogError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = normalize_args(args.into_iter().map(Into::into));
    if args.len() <= 1 {
        return Ok(Command::Help);
    }

    Cli::try_parse_from(args)
        .map_err(|e| ClogError::InvalidArguments(clap_message(&e)))?
        .into_command()
}

/// Rewrite single-dash long flags (`-type=x`, `-task-num`) to `--type=x`,
/// `--task-num`.
///
/// A token that is the value of a preceding value flag is left alone, as is
/// everything after a bare `--`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_value = false;
    let mut verbatim = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || verbatim || expects_value {
            expects_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            verbatim = true;
            normalized.push(arg);
            continue;
        }

        let flag = if text.starts_with("--") {
            text.to_string()
        } else if text.starts_with('-') && text.len() > 2 {
            format!("-{text}")
        } else {
            normalized.push(arg);
            continue;
        };

        let name = flag.trim_start_matches('-');
        expects_value = !name.contains('=') && VALUE_FLAGS.contains(&name);
        normalized.push(OsString::from(flag));
    }

    normalized
}

/// First line of a clap error, without the `error: ` prefix.
fn clap_message(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).trim().to_string()
}
