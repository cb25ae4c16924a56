// Telemetry service - Use case for range-bounded telemetry retrieval
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::range::RangeSpec;
use crate::domain::telemetry::TelemetryRecord;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid range")]
    InvalidRange(String),
    #[error("{0}")]
    StoreQuery(String),
}

#[derive(Clone)]
pub struct TelemetryService {
    repository: Arc<dyn TelemetryRepository>,
    table: String,
}

impl TelemetryService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, table: String) -> Self {
        Self { repository, table }
    }

    pub async fn fetch_telemetry(&self, range: &str) -> Result<Vec<TelemetryRecord>, GatewayError> {
        let range: RangeSpec = range
            .parse()
            .map_err(|_| GatewayError::InvalidRange(range.to_string()))?;

        let query = build_range_query(&self.table, range);
        tracing::debug!(%range, "Executing telemetry query: {}", query);

        let mut records = self.repository.execute_query(&query).await.map_err(|e| {
            let message = format!("{:#}", e);
            tracing::error!("Telemetry store query failed: {}", message);
            GatewayError::StoreQuery(message)
        })?;

        if !records.is_sorted_by_key(|r| r.time) {
            tracing::warn!(%range, "Store returned records out of order, re-sorting");
            records.sort_by_key(|r| r.time);
        }

        tracing::debug!(%range, count = records.len(), "Telemetry query complete");
        Ok(records)
    }
}

/// Range query over generation time, oldest first.
pub fn build_range_query(table: &str, range: RangeSpec) -> String {
    format!(
        "{}\n| where TimeGenerated > ago({})\n| order by TimeGenerated asc\n| project TimeGenerated, temp, hum, deviceTime",
        table,
        range.token()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubRepository {
        queries: Mutex<Vec<String>>,
        rows: Vec<TelemetryRecord>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl TelemetryRepository for StubRepository {
        async fn execute_query(&self, query: &str) -> anyhow::Result<Vec<TelemetryRecord>> {
            self.queries.lock().unwrap().push(query.to_string());
            match &self.fail_with {
                Some(message) => anyhow::bail!("{}", message),
                None => Ok(self.rows.clone()),
            }
        }
    }

    fn service(repo: Arc<StubRepository>) -> TelemetryService {
        TelemetryService::new(repo, "telemetry".to_string())
    }

    fn record(minute: u32, temp: Option<f64>) -> TelemetryRecord {
        let time = Utc.with_ymd_and_hms(2026, 10, 19, 8, minute, 0).unwrap();
        TelemetryRecord::new(time, temp, Some(50.0))
    }

    #[tokio::test]
    async fn test_invalid_range_never_reaches_store() {
        let repo = Arc::new(StubRepository::default());
        let service = service(repo.clone());

        for token in ["", "2h", "1D", "1h ", "ago(365d)", "7d|take 1"] {
            let err = service.fetch_telemetry(token).await.unwrap_err();
            assert!(matches!(err, GatewayError::InvalidRange(ref t) if t == token));
            assert_eq!(err.to_string(), "Invalid range");
        }

        assert!(repo.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_valid_range_builds_query() {
        let repo = Arc::new(StubRepository::default());
        let records = service(repo.clone()).fetch_telemetry("6h").await.unwrap();

        assert!(records.is_empty());
        let queries = repo.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0],
            "telemetry\n| where TimeGenerated > ago(6h)\n| order by TimeGenerated asc\n| project TimeGenerated, temp, hum, deviceTime"
        );
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_message() {
        let repo = Arc::new(StubRepository {
            fail_with: Some("Failed to send request to store: connection refused".to_string()),
            ..Default::default()
        });

        let err = service(repo).fetch_telemetry("1d").await.unwrap_err();
        assert!(matches!(err, GatewayError::StoreQuery(_)));
        assert_eq!(err.to_string(), "Failed to send request to store: connection refused");
    }

    #[tokio::test]
    async fn test_order_preserved_and_repaired() {
        let ordered = vec![record(1, Some(20.0)), record(2, None), record(3, Some(22.5))];
        let repo = Arc::new(StubRepository {
            rows: ordered.clone(),
            ..Default::default()
        });
        assert_eq!(service(repo).fetch_telemetry("1h").await.unwrap(), ordered);

        let repo = Arc::new(StubRepository {
            rows: vec![ordered[2].clone(), ordered[0].clone(), ordered[1].clone()],
            ..Default::default()
        });
        assert_eq!(service(repo).fetch_telemetry("1h").await.unwrap(), ordered);
    }
}
