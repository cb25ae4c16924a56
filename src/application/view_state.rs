// View state for the monitoring display and its refresh transitions
use crate::application::telemetry_source::TransportError;
use crate::domain::chart::ChartFrame;
use crate::domain::range::RangeSpec;
use crate::domain::status::StatusState;
use crate::domain::telemetry::QueryResult;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

pub const NO_DATA_MESSAGE: &str = "No data returned. Check your time range or sensor connection.";
const LOADING_TEXT: &str = "Loading...";
const FAILED_TEXT: &str = "Failed to load";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub status: StatusState,
    pub status_text: String,
    pub error: Option<String>,
    /// Last successfully rendered frame; survives failed cycles.
    pub frame: ChartFrame,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            status: StatusState::Loading,
            status_text: LOADING_TEXT.to_string(),
            error: None,
            frame: ChartFrame::default(),
        }
    }
}

impl ViewState {
    pub fn begin_refresh(&self) -> ViewState {
        ViewState {
            status: StatusState::Loading,
            status_text: LOADING_TEXT.to_string(),
            error: None,
            frame: self.frame.clone(),
        }
    }

    pub fn complete<Tz: TimeZone>(
        &self,
        range: RangeSpec,
        outcome: Result<QueryResult, TransportError>,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> ViewState
    where
        Tz::Offset: fmt::Display,
    {
        let data = match outcome {
            Err(e) => return self.failed(e.to_string()),
            Ok(QueryResult::Failure { error }) if error.is_empty() => {
                return self.failed(NO_DATA_MESSAGE.to_string());
            }
            Ok(QueryResult::Failure { error }) => return self.failed(error),
            Ok(QueryResult::Success { data, .. }) if data.is_empty() => {
                return self.failed(NO_DATA_MESSAGE.to_string());
            }
            Ok(QueryResult::Success { data, .. }) => data,
        };

        ViewState {
            status: StatusState::Ok,
            status_text: format!("Updated: {}", now.with_timezone(tz).format("%H:%M:%S")),
            error: None,
            frame: ChartFrame::from_records(&data, range, tz),
        }
    }

    fn failed(&self, message: String) -> ViewState {
        ViewState {
            status: StatusState::Error,
            status_text: FAILED_TEXT.to_string(),
            error: Some(message),
            frame: self.frame.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::TelemetryRecord;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 5).unwrap()
    }

    fn records() -> Vec<TelemetryRecord> {
        let t0 = Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
        vec![
            TelemetryRecord::new(t0, Some(20.0), Some(40.0)),
            TelemetryRecord::new(t0 + chrono::Duration::seconds(30), None, Some(41.0)),
            TelemetryRecord::new(t0 + chrono::Duration::seconds(60), Some(22.5), Some(42.0)),
        ]
    }

    fn loaded() -> ViewState {
        ViewState::default()
            .begin_refresh()
            .complete(RangeSpec::OneHour, Ok(QueryResult::success(records())), now(), &Utc)
    }

    #[test]
    fn test_success_renders_frame() {
        let view = loaded();

        assert_eq!(view.status, StatusState::Ok);
        assert_eq!(view.status_text, "Updated: 14:30:05");
        assert_eq!(view.error, None);
        assert_eq!(view.frame.temp.values, vec![Some(20.0), None, Some(22.5)]);
        assert_eq!(view.frame.stats.data_points, 3);
    }

    #[test]
    fn test_empty_data_is_an_error() {
        let view = loaded().begin_refresh().complete(
            RangeSpec::OneHour,
            Ok(QueryResult::success(vec![])),
            now(),
            &Utc,
        );

        assert_eq!(view.status, StatusState::Error);
        assert_eq!(view.status_text, "Failed to load");
        assert_eq!(view.error.as_deref(), Some(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_gateway_message_shown_verbatim() {
        let previous = loaded();
        let view = previous.begin_refresh().complete(
            RangeSpec::OneHour,
            Ok(QueryResult::failure("Kusto request failed: 403 Forbidden")),
            now(),
            &Utc,
        );

        assert_eq!(view.status, StatusState::Error);
        assert_eq!(view.error.as_deref(), Some("Kusto request failed: 403 Forbidden"));
        assert_eq!(view.frame, previous.frame);
    }

    #[test]
    fn test_transport_failure_keeps_frame() {
        let previous = loaded();
        let view = previous.begin_refresh().complete(
            RangeSpec::OneHour,
            Err(TransportError::Status(502)),
            now(),
            &Utc,
        );

        assert_eq!(view.status, StatusState::Error);
        assert_eq!(view.error.as_deref(), Some("Server returned 502"));
        assert_eq!(view.frame, previous.frame);
    }

    #[test]
    fn test_begin_refresh_clears_error() {
        let failed = ViewState::default().complete(
            RangeSpec::OneHour,
            Err(TransportError::Network("connection refused".to_string())),
            now(),
            &Utc,
        );
        let view = failed.begin_refresh();

        assert_eq!(view.status, StatusState::Loading);
        assert_eq!(view.status_text, "Loading...");
        assert_eq!(view.error, None);
    }

    #[test]
    fn test_repeat_cycle_is_identical() {
        let first = loaded();
        let second = first.begin_refresh().complete(
            RangeSpec::OneHour,
            Ok(QueryResult::success(records())),
            now(),
            &Utc,
        );
        assert_eq!(first, second);
    }
}
