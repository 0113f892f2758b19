//! Publish Service
//!
//! Runs one event through the pipeline:
//!
//! ```text
//! InvocationConfig ─build─→ OutboundEvent ─encode─→ payload
//!                                                      │
//!                          BrokerSettings ─connect─→ connection
//!                                                      │
//!                                      publish ─→ flush (bounded) ─→ receipt
//! ```
//!
//! The payload is encoded before connecting, so a serialization failure never
//! touches the network. Nothing is retried.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::BrokerSettings;
use crate::domain::{InvocationConfig, OutboundEvent};
use crate::error::{ClogError, ConnectionStage};
use crate::ports::{BrokerConnection, BrokerConnector};

/// Upper bound on writing the outbound buffer out to the server.
pub const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Subject the event went to.
    pub subject: String,
    /// The event exactly as published.
    pub event: OutboundEvent,
}

/// Publishes events through an injected broker connector.
pub struct PublishService<C: BrokerConnector> {
    connector: C,
    flush_timeout: Duration,
}

impl<C: BrokerConnector> PublishService<C> {
    /// Create a service with the standard flush timeout.
    pub fn new(connector: C) -> Self {
        Self::with_flush_timeout(connector, FLUSH_TIMEOUT)
    }

    /// Create a service with a custom flush timeout.
    pub fn with_flush_timeout(connector: C, flush_timeout: Duration) -> Self {
        Self {
            connector,
            flush_timeout,
        }
    }

    /// Build the event for `config` and publish it.
    pub async fn publish(
        &self,
        config: &InvocationConfig,
        settings: &BrokerSettings,
    ) -> Result<PublishReceipt, ClogError> {
        self.publish_event(OutboundEvent::build(config), settings)
            .await
    }

    /// Publish an already built event.
    pub async fn publish_event(
        &self,
        event: OutboundEvent,
        settings: &BrokerSettings,
    ) -> Result<PublishReceipt, ClogError> {
        let payload = event.to_payload()?;
        let subject = event.event.clone();

        let connection = self.connector.connect(settings).await.map_err(|e| {
            error!(url = %settings.url, error = %e, "Broker connection failed");
            e
        })?;

        // The connection is dropped when this function returns, on every path.
        self.send(&connection, &subject, payload).await.map_err(|e| {
            error!(subject = %subject, stage = ?e.stage(), error = %e, "Publish failed");
            e
        })?;

        info!(subject = %subject, "Event published");
        Ok(PublishReceipt { subject, event })
    }

    async fn send(
        &self,
        connection: &C::Connection,
        subject: &str,
        payload: Vec<u8>,
    ) -> Result<(), ClogError> {
        debug!(subject = subject, bytes = payload.len(), "Publishing event");
        connection.publish(subject, payload).await?;

        match tokio::time::timeout(self.flush_timeout, connection.flush()).await {
            Ok(result) => result,
            Err(_) => Err(ClogError::on_subject(
                ConnectionStage::FlushTimeout,
                subject,
                format!(
                    "outbound buffer not flushed within {}s",
                    self.flush_timeout.as_secs()
                ),
            )),
        }
    }
}
