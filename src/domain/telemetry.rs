// Telemetry data domain models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of sensor telemetry as stored by the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Store-assigned generation time, used for ordering.
    pub time: DateTime<Utc>,
    pub temp: Option<f64>,
    pub hum: Option<f64>,
    /// Whatever the device reported, passed through untouched.
    #[serde(rename = "deviceTime", default)]
    pub device_time: Option<serde_json::Value>,
}

impl TelemetryRecord {
    pub fn new(time: DateTime<Utc>, temp: Option<f64>, hum: Option<f64>) -> Self {
        Self {
            time,
            temp,
            hum,
            device_time: None,
        }
    }

    pub fn with_device_time(mut self, device_time: serde_json::Value) -> Self {
        self.device_time = Some(device_time);
        self
    }
}

/// Gateway reply for a telemetry request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QueryResultWire", into = "QueryResultWire")]
pub enum QueryResult {
    Success {
        count: usize,
        data: Vec<TelemetryRecord>,
    },
    Failure {
        error: String,
    },
}

impl QueryResult {
    pub fn success(data: Vec<TelemetryRecord>) -> Self {
        QueryResult::Success {
            count: data.len(),
            data,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        QueryResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Success { .. })
    }
}

#[derive(Serialize, Deserialize)]
struct QueryResultWire {
    #[serde(default)]
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Vec<TelemetryRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<QueryResultWire> for QueryResult {
    fn from(wire: QueryResultWire) -> Self {
        if wire.success {
            let data = wire.data.unwrap_or_default();
            QueryResult::Success {
                count: wire.count.unwrap_or(data.len()),
                data,
            }
        } else {
            QueryResult::Failure {
                error: wire.error.unwrap_or_default(),
            }
        }
    }
}

impl From<QueryResult> for QueryResultWire {
    fn from(result: QueryResult) -> Self {
        match result {
            QueryResult::Success { count, data } => QueryResultWire {
                success: true,
                count: Some(count),
                data: Some(data),
                error: None,
            },
            QueryResult::Failure { error } => QueryResultWire {
                success: false,
                count: None,
                data: None,
                error: Some(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_success_serializes_nulls() {
        let time = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let result = QueryResult::success(vec![TelemetryRecord::new(time, None, Some(40.5))]);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "count": 1,
                "data": [{
                    "time": "2026-10-19T12:00:00Z",
                    "temp": null,
                    "hum": 40.5,
                    "deviceTime": null
                }]
            })
        );
    }

    #[test]
    fn test_failure_serialization() {
        let value = serde_json::to_value(QueryResult::failure("cluster unreachable")).unwrap();
        assert_eq!(value, json!({ "success": false, "error": "cluster unreachable" }));
    }

    #[test]
    fn test_lenient_decoding() {
        // Missing data on a success reply reads as empty.
        let result: QueryResult = serde_json::from_value(json!({ "success": true })).unwrap();
        assert_eq!(result, QueryResult::success(vec![]));

        // The 400 body has no success flag at all.
        let result: QueryResult =
            serde_json::from_value(json!({ "error": "Invalid range" })).unwrap();
        assert_eq!(result, QueryResult::failure("Invalid range"));
    }

    #[test]
    fn test_device_time_is_opaque() {
        let record: TelemetryRecord = serde_json::from_value(json!({
            "time": "2026-10-19T12:00:00.5Z",
            "temp": 21.0,
            "hum": null,
            "deviceTime": 1760875200
        }))
        .unwrap();

        assert_eq!(record.device_time, Some(json!(1760875200)));
        assert_eq!(record.hum, None);
    }
}
