//! Service Layer
//!
//! Orchestrates the domain and the broker ports.

pub mod publish_service;

pub use publish_service::{PublishReceipt, PublishService, FLUSH_TIMEOUT};
