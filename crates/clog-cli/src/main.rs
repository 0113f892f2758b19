//! `clog`: publish one Claude activity event to NATS.

use std::io;
use std::process::ExitCode;

use clog_cli::App;
use clog_publisher::{BakedDefaults, EnvOverrides, NatsConnector};
use clog_telemetry::{init_logging, LogConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {e}");
    }

    let app = App::new(
        NatsConnector::new(),
        EnvOverrides::from_env(),
        BakedDefaults::compiled(),
    );

    let code = app
        .run(std::env::args_os(), &mut io::stdout(), &mut io::stderr())
        .await;

    ExitCode::from(code)
}
