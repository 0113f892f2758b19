//! # Clog Publisher
//!
//! Turns one validated invocation into one JSON event on a NATS subject.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `EventType`: the closed set `task | question | progress | session`
//!   - `map_subject`: (event type, state) → subject
//!   - `InvocationConfig`: validated flag values
//!   - `OutboundEvent`: the wire record
//!
//! - **Config** (`config`): broker URL and credential-source selection
//!
//! - **Ports Layer** (`ports/`): `BrokerConnector`, `BrokerConnection`
//!
//! - **Adapters Layer** (`adapters/`): `NatsConnector` over `async-nats`
//!
//! - **Service Layer** (`service/`): `PublishService` runs
//!   build → encode → connect → publish → flush
//!
//! ## Subjects
//!
//! | type | state | subject |
//! |------|-------|---------|
//! | task | in_progress | `claude.tasks.started` |
//! | task | completed | `claude.tasks.completed` |
//! | task | blocked | `claude.tasks.blocked` |
//! | task | other / none | `claude.tasks` |
//! | question | blocked | `claude.questions.waiting` |
//! | question | other / none | `claude.questions.asked` |
//! | progress | any | `claude.progress.update` |
//! | session | completed | `claude.session.completed` |
//! | session | other / none | `claude.session.started` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use clog_publisher::{BrokerSettings, InvocationConfig, NatsConnector, PublishService};
//!
//! let config = InvocationConfig::new("task", "Adding VAT breakdown")?.with_state("in_progress");
//! let service = PublishService::new(NatsConnector::new());
//! let receipt = service.publish(&config, &BrokerSettings::from_env()).await?;
//! assert_eq!(receipt.subject, "claude.tasks.started");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-exports for convenience
pub use adapters::{NatsConnection, NatsConnector};
pub use config::{BakedDefaults, BrokerSettings, CredentialOrigin, Credentials, EnvOverrides};
pub use domain::{map_subject, EventType, InvocationConfig, OutboundEvent};
pub use error::{
    ClogError, ConnectionStage, EXIT_CONNECTION_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS,
};
pub use ports::{BrokerConnection, BrokerConnector};
pub use service::{PublishReceipt, PublishService, FLUSH_TIMEOUT};
