//! Outbound Ports (Driven Ports)
//!
//! The publisher depends on a broker only through these traits. The NATS
//! adapter implements them for real runs; tests plug in an in-memory fake.

use async_trait::async_trait;

use crate::config::BrokerSettings;
use crate::error::ClogError;

/// Opens a broker connection (Driven Port)
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    /// Live connection type returned by [`connect`](Self::connect).
    type Connection: BrokerConnection;

    /// Open a connection using the resolved settings.
    ///
    /// Credential loading failures map to the `credentials` stage, transport
    /// failures to the `connect` stage. No retry is attempted.
    async fn connect(&self, settings: &BrokerSettings) -> Result<Self::Connection, ClogError>;
}

/// An open broker connection (Driven Port)
///
/// Dropping the connection releases it.
#[async_trait]
pub trait BrokerConnection: Send + Sync {
    /// Queue `payload` for delivery on `subject`.
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), ClogError>;

    /// Write everything buffered so far out to the server socket.
    async fn flush(&self) -> Result<(), ClogError>;
}
