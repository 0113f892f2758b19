//! Adapters Layer
//!
//! Concrete implementations of the driven ports:
//! - `NatsConnector` / `NatsConnection`: publishing through `async-nats`

pub mod nats;

pub use nats::{NatsConnection, NatsConnector, CLIENT_NAME, DEFAULT_CONNECT_TIMEOUT};
