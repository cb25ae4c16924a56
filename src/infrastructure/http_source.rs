// HTTP client for the gateway's telemetry endpoint
use crate::application::telemetry_source::{TelemetrySource, TransportError};
use crate::domain::range::RangeSpec;
use crate::domain::telemetry::QueryResult;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTelemetrySource {
    pub fn new(gateway_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: format!("{}/api/telemetry", gateway_url.trim_end_matches('/')),
            client,
        })
    }
}

#[async_trait]
impl TelemetrySource for HttpTelemetrySource {
    async fn fetch(&self, range: RangeSpec) -> Result<QueryResult, TransportError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("range", range.token())])
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_slice(&body)
                .map_err(|e| TransportError::Malformed(e.to_string()));
        }

        // Error replies that explain themselves are shown as-is.
        match serde_json::from_slice::<QueryResult>(&body) {
            Ok(QueryResult::Failure { error }) if !error.is_empty() => {
                Ok(QueryResult::failure(error))
            }
            _ => Err(TransportError::Status(status.as_u16())),
        }
    }
}
