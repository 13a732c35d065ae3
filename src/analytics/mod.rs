//! Aggregation of a user's finance records into summary metrics and chart
//! series. Everything here is pure: records in, aggregates out.

mod metrics;
mod series;

pub use metrics::compute_metrics;
pub use series::compute_series;

use chrono::NaiveDate;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("malformed record date {date:?}: {source}")]
    MalformedDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub fn parse_record_date(date: &str) -> Result<NaiveDate, AnalyticsError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|source| AnalyticsError::MalformedDate {
        date: date.to_string(),
        source,
    })
}

/// Round half away from zero to two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(66.66666), 66.67);
        assert_eq!(round2(-12.345678), -12.35);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn parses_iso_dates() {
        let date = parse_record_date("2024-02-29").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn rejects_invalid_dates() {
        for bad in ["2023-02-29", "2024-13-01", "yesterday", "", "05/01/2024"] {
            let err = parse_record_date(bad).unwrap_err();
            assert!(matches!(err, AnalyticsError::MalformedDate { ref date, .. } if date == bad));
        }
    }
}
