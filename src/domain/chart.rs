// Chart series derived from telemetry records
use super::range::RangeSpec;
use super::telemetry::TelemetryRecord;
use chrono::TimeZone;
use std::fmt;

const DATED_LABEL_FORMAT: &str = "%b %-d %H:%M";
const TIME_LABEL_FORMAT: &str = "%H:%M:%S";
pub const PLACEHOLDER: &str = "--";

/// Index-aligned labels and values. `None` is a gap, never zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    pub current_temp: Option<f64>,
    pub current_hum: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub data_points: usize,
}

impl SummaryStats {
    /// Computed over the non-null values only; an empty set leaves min/max undefined.
    pub fn from_series(temp: &ChartSeries, hum: &ChartSeries) -> Self {
        let min_temp = temp.present().reduce(f64::min);
        let max_temp = temp.present().reduce(f64::max);

        Self {
            current_temp: temp.last(),
            current_hum: hum.last(),
            min_temp,
            max_temp,
            data_points: temp.len(),
        }
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temp {} °C (min {}, max {}) | hum {} % | {} points",
            display_value(self.current_temp),
            display_value(self.min_temp),
            display_value(self.max_temp),
            display_value(self.current_hum),
            self.data_points
        )
    }
}

/// Everything a render pass needs from one set of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartFrame {
    pub temp: ChartSeries,
    pub hum: ChartSeries,
    pub stats: SummaryStats,
}

impl ChartFrame {
    pub fn from_records<Tz: TimeZone>(
        records: &[TelemetryRecord],
        range: RangeSpec,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let labels: Vec<String> = records
            .iter()
            .map(|r| format_label(r, range, tz))
            .collect();

        let temp = ChartSeries {
            labels: labels.clone(),
            values: records.iter().map(|r| r.temp.map(round_one_decimal)).collect(),
        };
        let hum = ChartSeries {
            labels,
            values: records.iter().map(|r| r.hum.map(round_one_decimal)).collect(),
        };
        let stats = SummaryStats::from_series(&temp, &hum);

        Self { temp, hum, stats }
    }
}

pub fn format_label<Tz: TimeZone>(record: &TelemetryRecord, range: RangeSpec, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let local = record.time.with_timezone(tz);
    if range.labels_include_date() {
        local.format(DATED_LABEL_FORMAT).to_string()
    } else {
        local.format(TIME_LABEL_FORMAT).to_string()
    }
}

/// Half away from zero: 21.25 -> 21.3, 21.2345 -> 21.2.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn display_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => PLACEHOLDER.to_string(),
    }
}
