//! One run of `clog`, from argument vector to exit code.
//!
//! Output streams are injected so the whole flow runs in tests against a
//! fake broker and in-memory buffers.

use std::ffi::OsString;
use std::fmt;
use std::io::Write;

use clog_publisher::{
    BakedDefaults, BrokerConnector, BrokerSettings, ClogError, EnvOverrides, PublishService,
    EXIT_SUCCESS,
};
use tracing::debug;

use crate::cli::{parse_command, Command};
use crate::output::{confirmation, version_line, USAGE};

/// The CLI wired to a broker connector and a configuration source.
pub struct App<C: BrokerConnector> {
    service: PublishService<C>,
    env: EnvOverrides,
    defaults: BakedDefaults,
}

impl<C: BrokerConnector> App<C> {
    /// Create an app publishing through `connector`.
    pub fn new(connector: C, env: EnvOverrides, defaults: BakedDefaults) -> Self {
        Self::with_service(PublishService::new(connector), env, defaults)
    }

    /// Create an app around a preconfigured service.
    pub fn with_service(
        service: PublishService<C>,
        env: EnvOverrides,
        defaults: BakedDefaults,
    ) -> Self {
        Self {
            service,
            env,
            defaults,
        }
    }

    /// Run once and return the process exit code.
    ///
    /// Write failures on `out`/`err` are logged at `debug`; the exit code
    /// reflects the publish outcome only.
    pub async fn run<I, T>(&self, args: I, out: &mut impl Write, err: &mut impl Write) -> u8
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let command = match parse_command(args) {
            Ok(command) => command,
            Err(e) => {
                emit(err, "stderr", format_args!("Error: {e}\n\n{USAGE}\n"));
                return e.exit_code();
            }
        };

        match command {
            Command::Help => {
                emit(out, "stdout", format_args!("{USAGE}\n"));
                EXIT_SUCCESS
            }
            Command::Version => {
                emit(out, "stdout", format_args!("{}\n", version_line()));
                EXIT_SUCCESS
            }
            Command::Publish(config) => {
                let settings = BrokerSettings::resolve(&self.env, &self.defaults);
                debug!(
                    url = %settings.url,
                    credentials = settings.credentials.kind(),
                    origin = ?settings.origin,
                    "Resolved broker settings"
                );

                match self.service.publish(&config, &settings).await {
                    Ok(receipt) => {
                        emit(out, "stdout", confirmation(&config, &receipt.subject));
                        EXIT_SUCCESS
                    }
                    Err(e) => report(err, &e),
                }
            }
        }
    }
}

fn report(err: &mut impl Write, error: &ClogError) -> u8 {
    emit(err, "stderr", format_args!("Error: {error}\n"));
    error.exit_code()
}

fn emit(stream: &mut impl Write, name: &'static str, text: impl fmt::Display) {
    if let Err(e) = write!(stream, "{text}").and_then(|()| stream.flush()) {
        debug!(stream = name, error = %e, "Output write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clog_publisher::testing::{FailAt, RecordingConnector};

    async fn run(connector: RecordingConnector, args: &[&str]) -> (u8, String, String) {
        let app = App::new(connector, EnvOverrides::default(), BakedDefaults::default());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = app.run(args.iter().copied(), &mut out, &mut err).await;
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_help_goes_to_stdout() {
        let connector = RecordingConnector::new();
        let (code, out, err) = run(connector.clone(), &["clog"]).await;
        assert_eq!(code, 0);
        assert!(out.starts_with("clog - Claude Log Publisher for NATS"));
        assert!(err.is_empty());
        assert_eq!(connector.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_args_print_error_then_usage() {
        let connector = RecordingConnector::new();
        let (code, out, err) = run(connector.clone(), &["clog", "-type=task"]).await;
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: -type and -message are required\n\n"));
        assert!(err.contains("USAGE:"));
        assert_eq!(connector.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_success_prints_confirmation() {
        let connector = RecordingConnector::new();
        let (code, out, err) = run(
            connector.clone(),
            &["clog", "-type=question", "-state=blocked", "-message=Q?"],
        )
        .await;
        assert_eq!(code, 0, "{err}");
        assert_eq!(
            out,
            "✓ Message published successfully to 'claude.questions.waiting'\n  Type: question\n  State: blocked\n"
        );
        assert_eq!(connector.published()[0].0, "claude.questions.waiting");
    }

    #[tokio::test]
    async fn test_publish_failure_is_exit_code_2() {
        let connector = RecordingConnector::failing_at(FailAt::Publish);
        let (code, out, err) = run(connector, &["clog", "-type=task", "-message=x"]).await;
        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: publish failed"), "{err}");
        assert!(err.contains("claude.tasks"));
        assert!(!err.contains("USAGE:"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_closed_stdout_keeps_publish_outcome() {
        let connector = RecordingConnector::new();
        let app = App::new(
            connector.clone(),
            EnvOverrides::default(),
            BakedDefaults::default(),
        );
        let mut err = Vec::new();

        let code = app
            .run(
                ["clog", "-type=progress", "-message=50%"],
                &mut BrokenPipe,
                &mut err,
            )
            .await;

        assert_eq!(code, 0);
        assert!(err.is_empty());
        assert_eq!(connector.published().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_stderr_keeps_failure_code() {
        let connector = RecordingConnector::failing_at(FailAt::Connect);
        let app = App::new(connector, EnvOverrides::default(), BakedDefaults::default());
        let mut out = Vec::new();

        let code = app
            .run(["clog", "-type=task", "-message=x"], &mut out, &mut BrokenPipe)
            .await;

        assert_eq!(code, 2);
        assert!(out.is_empty());
    }
}
