//! NATS adapter
//!
//! Implements the broker ports on top of `async-nats`. The client owns the
//! wire protocol and the creds-file format; this adapter only translates
//! [`Credentials`] into connect options and client errors into [`ClogError`].

use std::sync::Arc;
use std::time::Duration;

use async_nats::{AuthError, Client, ConnectOptions};
use async_trait::async_trait;
use nkeys::KeyPair;
use tracing::{debug, warn};

use crate::config::{BrokerSettings, Credentials};
use crate::error::{ClogError, ConnectionStage};
use crate::ports::{BrokerConnection, BrokerConnector};

/// Upper bound on opening the TCP connection and completing the handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Name the client announces to the server.
pub const CLIENT_NAME: &str = "clog";

/// Connects to NATS with `async-nats`.
#[derive(Debug, Clone)]
pub struct NatsConnector {
    connect_timeout: Duration,
}

impl NatsConnector {
    /// Create a connector with the default connect timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_connect_timeout(DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a connector with a custom connect timeout.
    #[must_use]
    pub fn with_connect_timeout(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    async fn options(&self, credentials: &Credentials) -> Result<ConnectOptions, ClogError> {
        let options = ConnectOptions::new()
            .name(CLIENT_NAME)
            .connection_timeout(self.connect_timeout);

        let options = match credentials {
            Credentials::CredsFile(path) => options
                .credentials_file(path)
                .await
                .map_err(|e| {
                    ClogError::connection(
                        ConnectionStage::Credentials,
                        format!("cannot load credentials file {}: {e}", path.display()),
                    )
                })?,
            Credentials::UserPassword { user, password } => {
                options.user_and_password(user.clone(), password.clone())
            }
            Credentials::Token(token) => options.token(token.clone()),
            // An undecodable nkey seed is dropped and the dial proceeds
            // without authentication.
            Credentials::NKey { seed } => match decode_seed(seed) {
                Ok(_) => options.nkey(seed.clone()),
                Err(e) => {
                    warn!(stage = "credentials", error = %e, "Ignoring nkey seed");
                    options
                }
            },
            Credentials::JwtSeed { jwt, seed } => {
                let key_pair = Arc::new(decode_seed(seed)?);
                options.jwt(jwt.clone(), move |nonce| {
                    let key_pair = key_pair.clone();
                    async move { key_pair.sign(&nonce).map_err(AuthError::new) }
                })
            }
            Credentials::None => options,
        };

        Ok(options)
    }
}

impl Default for NatsConnector {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_seed(seed: &str) -> Result<KeyPair, ClogError> {
    KeyPair::from_seed(seed).map_err(|e| {
        ClogError::connection(ConnectionStage::Credentials, format!("invalid nkey seed: {e}"))
    })
}

#[async_trait]
impl BrokerConnector for NatsConnector {
    type Connection = NatsConnection;

    async fn connect(&self, settings: &BrokerSettings) -> Result<NatsConnection, ClogError> {
        debug!(
            url = %settings.url,
            auth = settings.credentials.kind(),
            origin = ?settings.origin,
            "Connecting to NATS"
        );

        let options = self.options(&settings.credentials).await?;
        let client = options
            .connect(settings.url.as_str())
            .await
            .map_err(|e| {
                ClogError::connection(
                    ConnectionStage::Connect,
                    format!("cannot reach {}: {e}", settings.url),
                )
            })?;

        Ok(NatsConnection { client })
    }
}

/// An open `async-nats` client.
#[derive(Debug)]
pub struct NatsConnection {
    client: Client,
}

#[async_trait]
impl BrokerConnection for NatsConnection {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), ClogError> {
        self.client
            .publish(subject.to_string(), payload.into())
            .await
            .map_err(|e| ClogError::on_subject(ConnectionStage::Publish, subject, e))
    }

    async fn flush(&self) -> Result<(), ClogError> {
        self.client
            .flush()
            .await
            .map_err(|e| ClogError::connection(ConnectionStage::Flush, e))
    }
}
