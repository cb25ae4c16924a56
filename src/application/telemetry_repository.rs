// Repository trait for telemetry data access
use crate::domain::telemetry::TelemetryRecord;
use async_trait::async_trait;

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Execute a range query and return the primary result rows, normalized.
    /// Errors carry the store's diagnostic with credentials already redacted.
    async fn execute_query(&self, query: &str) -> anyhow::Result<Vec<TelemetryRecord>>;
}
