//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - The closed set of event types
//! - Subject mapping
//! - Invocation validation
//! - The outbound event record
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod event;
pub mod event_type;
pub mod invocation;
pub mod subject;

pub use event::OutboundEvent;
pub use event_type::EventType;
pub use invocation::InvocationConfig;
pub use subject::map_subject;
