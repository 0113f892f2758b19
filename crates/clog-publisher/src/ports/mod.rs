//! Ports Layer
//!
//! Driven ports only: clog is driven by its CLI, and depends on a broker.

pub mod outbound;

pub use outbound::{BrokerConnection, BrokerConnector};
