// Transport boundary between the poller and the gateway
use crate::domain::range::RangeSpec;
use crate::domain::telemetry::QueryResult;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Server returned {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// A gateway failure reply that carries a message comes back as
    /// `Ok(QueryResult::Failure)`; everything else that goes wrong is a
    /// `TransportError`.
    async fn fetch(&self, range: RangeSpec) -> Result<QueryResult, TransportError>;
}
