//! HTTP transport for the collector relay.

use async_trait::async_trait;

use super::{CollectorMessage, CollectorSink, RelayError};

/// Posts collector messages as JSON to a single endpoint.
pub struct HttpCollectorSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCollectorSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CollectorSink for HttpCollectorSink {
    async fn deliver(&self, message: &CollectorMessage) -> Result<(), RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RelayError::Endpoint(format!(
                "{} returned {}",
                self.endpoint,
                response.status()
            )));
        }

        Ok(())
    }
}
