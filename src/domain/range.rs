// Lookback range domain model
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Invalid range: {0}")]
    Invalid(String),
}

/// Lookback window anchored at query time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RangeSpec {
    #[default]
    OneHour,
    SixHours,
    TwelveHours,
    OneDay,
    SevenDays,
}

impl RangeSpec {
    pub const ALL: [RangeSpec; 5] = [
        RangeSpec::OneHour,
        RangeSpec::SixHours,
        RangeSpec::TwelveHours,
        RangeSpec::OneDay,
        RangeSpec::SevenDays,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            RangeSpec::OneHour => "1h",
            RangeSpec::SixHours => "6h",
            RangeSpec::TwelveHours => "12h",
            RangeSpec::OneDay => "1d",
            RangeSpec::SevenDays => "7d",
        }
    }

    pub fn lookback(&self) -> chrono::Duration {
        match self {
            RangeSpec::OneHour => chrono::Duration::hours(1),
            RangeSpec::SixHours => chrono::Duration::hours(6),
            RangeSpec::TwelveHours => chrono::Duration::hours(12),
            RangeSpec::OneDay => chrono::Duration::days(1),
            RangeSpec::SevenDays => chrono::Duration::days(7),
        }
    }

    /// Windows of a day or more cross midnight, so labels carry the date.
    pub fn labels_include_date(&self) -> bool {
        self.lookback() >= chrono::Duration::days(1)
    }
}

impl FromStr for RangeSpec {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeSpec::ALL
            .into_iter()
            .find(|r| r.token() == s)
            .ok_or_else(|| RangeError::Invalid(s.to_string()))
    }
}

impl TryFrom<String> for RangeSpec {
    type Error = RangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RangeSpec> for String {
    fn from(range: RangeSpec) -> Self {
        range.token().to_string()
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_tokens() {
        for range in RangeSpec::ALL {
            assert_eq!(range.token().parse::<RangeSpec>(), Ok(range));
        }
    }

    #[test]
    fn test_reject_unknown_tokens() {
        for token in ["", "2h", "1H", " 1h", "30m", "1w", "7d; drop table", "24h"] {
            assert_eq!(
                token.parse::<RangeSpec>(),
                Err(RangeError::Invalid(token.to_string()))
            );
        }
    }

    #[test]
    fn test_labels_include_date() {
        assert!(!RangeSpec::OneHour.labels_include_date());
        assert!(!RangeSpec::SixHours.labels_include_date());
        assert!(!RangeSpec::TwelveHours.labels_include_date());
        assert!(RangeSpec::OneDay.labels_include_date());
        assert!(RangeSpec::SevenDays.labels_include_date());
    }

    #[test]
    fn test_serde_uses_token() {
        let json = serde_json::to_string(&RangeSpec::TwelveHours).unwrap();
        assert_eq!(json, "\"12h\"");
        assert!(serde_json::from_str::<RangeSpec>("\"3d\"").is_err());
    }
}
