//! Testing Utilities
//!
//! In-memory broker fake for exercising the publish pipeline without a NATS
//! server. Available in unit tests and with the `test-utils` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::config::BrokerSettings;
use crate::error::{ClogError, ConnectionStage};
use crate::ports::{BrokerConnection, BrokerConnector};

/// Stage at which the fake broker misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    /// Refuse the connection.
    Connect,
    /// Reject the publish.
    Publish,
    /// Return an error from flush.
    Flush,
    /// Never complete the flush.
    StallFlush,
}

#[derive(Debug, Default)]
struct Recorded {
    connects: Vec<BrokerSettings>,
    published: Vec<(String, Vec<u8>)>,
    flushes: usize,
    released: usize,
}

/// Connector that records everything sent through it.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnector {
    recorded: Arc<Mutex<Recorded>>,
    fail_at: Option<FailAt>,
}

impl RecordingConnector {
    /// A connector whose broker accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose broker fails at `stage`.
    #[must_use]
    pub fn failing_at(stage: FailAt) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::default()
        }
    }

    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of connection attempts.
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.recorded().connects.len()
    }

    /// Settings passed to the most recent connection attempt.
    #[must_use]
    pub fn last_settings(&self) -> Option<BrokerSettings> {
        self.recorded().connects.last().cloned()
    }

    /// `(subject, payload)` pairs accepted by the broker.
    #[must_use]
    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.recorded().published.clone()
    }

    /// Number of completed flushes.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.recorded().flushes
    }

    /// Number of connections that have been dropped.
    #[must_use]
    pub fn released_count(&self) -> usize {
        self.recorded().released
    }
}

#[async_trait]
impl BrokerConnector for RecordingConnector {
    type Connection = RecordingConnection;

    async fn connect(&self, settings: &BrokerSettings) -> Result<RecordingConnection, ClogError> {
        self.recorded().connects.push(settings.clone());

        if self.fail_at == Some(FailAt::Connect) {
            return Err(ClogError::connection(
                ConnectionStage::Connect,
                format!("cannot reach {}: connection refused", settings.url),
            ));
        }

        Ok(RecordingConnection {
            recorded: self.recorded.clone(),
            fail_at: self.fail_at,
        })
    }
}

/// Connection handed out by [`RecordingConnector`].
#[derive(Debug)]
pub struct RecordingConnection {
    recorded: Arc<Mutex<Recorded>>,
    fail_at: Option<FailAt>,
}

impl RecordingConnection {
    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BrokerConnection for RecordingConnection {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), ClogError> {
        if self.fail_at == Some(FailAt::Publish) {
            return Err(ClogError::on_subject(
                ConnectionStage::Publish,
                subject,
                "connection closed",
            ));
        }
        self.recorded().published.push((subject.to_string(), payload));
        Ok(())
    }

    async fn flush(&self) -> Result<(), ClogError> {
        match self.fail_at {
            Some(FailAt::Flush) => Err(ClogError::connection(
                ConnectionStage::Flush,
                "connection closed",
            )),
            Some(FailAt::StallFlush) => std::future::pending().await,
            _ => {
                self.recorded().flushes += 1;
                Ok(())
            }
        }
    }
}

impl Drop for RecordingConnection {
    fn drop(&mut self) {
        self.recorded().released += 1;
    }
}
