//! Best-effort delivery to the external collector.
//!
//! The sink is an injectable transport so tests can substitute a capturing
//! stub and assert exactly which messages were attempted. Delivery is
//! fire-and-forget: the frame path never awaits it, failures are logged
//! locally, and nothing is retried.

mod http;
mod payload;

pub use http::HttpCollectorSink;
pub use payload::{
    CollectorMessage, ImagePayload, LogPayload, TrajectoryPayload, TrajectoryPoint,
};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("collector endpoint rejected the message: {0}")]
    Endpoint(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Transport seam for collector delivery.
#[async_trait]
pub trait CollectorSink: Send + Sync {
    async fn deliver(&self, message: &CollectorMessage) -> Result<(), RelayError>;
}

/// Hands messages to the sink without blocking the caller.
#[derive(Clone)]
pub struct Relay {
    sink: Arc<dyn CollectorSink>,
}

impl Relay {
    pub fn new(sink: Arc<dyn CollectorSink>) -> Self {
        Self { sink }
    }

    /// Spawns a delivery task and returns immediately. Failures are logged
    /// and dropped; the collector offers no acknowledgement worth waiting
    /// for.
    pub fn send(&self, message: CollectorMessage) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(error) = sink.deliver(&message).await {
                tracing::warn!(%error, "collector delivery failed");
            }
        });
    }
}

/// Discards every message. Useful when no collector is configured.
pub struct NullSink;

#[async_trait]
impl CollectorSink for NullSink {
    async fn deliver(&self, _message: &CollectorMessage) -> Result<(), RelayError> {
        Ok(())
    }
}

/// Records every attempted message for test assertions.
#[derive(Default)]
pub struct CapturingSink {
    messages: Mutex<Vec<CollectorMessage>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<CollectorMessage> {
        self.messages.lock().expect("capturing sink poisoned").clone()
    }
}

#[async_trait]
impl CollectorSink for CapturingSink {
    async fn deliver(&self, message: &CollectorMessage) -> Result<(), RelayError> {
        self.messages
            .lock()
            .expect("capturing sink poisoned")
            .push(message.clone());
        Ok(())
    }
}
