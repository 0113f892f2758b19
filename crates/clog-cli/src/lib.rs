//! # Clog CLI
//!
//! Flag parsing, usage and confirmation text, and the run loop behind the
//! `clog` binary.
//!
//! ```text
//! argv ─normalize─→ clap ─validate─→ InvocationConfig
//!                                          │
//!            EnvOverrides + BakedDefaults ─┴─→ PublishService ─→ exit code
//! ```
//!
//! | Outcome | Stream | Exit code |
//! |---------|--------|-----------|
//! | help / version | stdout | 0 |
//! | published | stdout | 0 |
//! | invalid arguments | stderr, followed by usage | 1 |
//! | serialization failure | stderr | 1 |
//! | credentials / connect / publish / flush failure | stderr | 2 |

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod app;
pub mod cli;
pub mod output;

pub use app::App;
pub use cli::{normalize_args, parse_command, Cli, Command};
pub use output::{confirmation, version_line, USAGE};
