//! ISO-8601 instants and the UTC date labels that name partitions.
//!
//! Calendar-invalid input (e.g. `2018-06-31`) is rejected, never rolled over.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::errors::{RecordError, RecordResult};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Whether `label` has the `YYYY-MM-DD` shape.
pub fn is_date_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parses an ISO-8601 instant. Inputs without an offset are taken as UTC.
pub fn parse_instant(value: &str) -> RecordResult<DateTime<Utc>> {
    if value.trim() != value {
        return Err(RecordError::InvalidTimestamp(value.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(RecordError::InvalidTimestamp(value.to_string()))
}

/// Formats the UTC calendar date of `instant` as `YYYY-MM-DD`.
pub fn date_label(instant: &DateTime<Utc>) -> RecordResult<String> {
    let label = instant.format("%Y-%m-%d").to_string();
    if !is_date_label(&label) {
        return Err(RecordError::InvalidTimestamp(label));
    }
    Ok(label)
}

/// Partition label for an ISO-8601 timestamp string.
pub fn partition_label(value: &str) -> RecordResult<String> {
    date_label(&parse_instant(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_utc() {
        assert_eq!(partition_label("2018-07-01T12:34:56Z").unwrap(), "2018-07-01");
    }

    #[test]
    fn test_label_normalizes_offset_to_utc() {
        assert_eq!(partition_label("2018-07-01T01:00:00+02:00").unwrap(), "2018-06-30");
        assert_eq!(partition_label("2018-06-30T23:30:00-01:00").unwrap(), "2018-07-01");
    }

    #[test]
    fn test_accepts_date_only_and_naive() {
        assert_eq!(partition_label("2018-06-15").unwrap(), "2018-06-15");
        assert_eq!(partition_label("2018-06-15T08:00").unwrap(), "2018-06-15");
        assert_eq!(partition_label("2018-06-15T08:00:01.250").unwrap(), "2018-06-15");
    }

    #[test]
    fn test_rejects_calendar_invalid() {
        let err = partition_label("2018-06-31T00:11:06Z").unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp(_)));
        assert!(partition_label("2018-02-29").is_err());
        assert!(partition_label("not a date").is_err());
        assert!(partition_label("").is_err());
    }

    #[test]
    fn test_rejects_surrounding_whitespace() {
        for padded in [" 2018-07-01T12:34:56Z", "2018-07-01T12:34:56Z\n", "2018-06-15 ", "\t2018-06-15"] {
            assert!(
                matches!(parse_instant(padded), Err(RecordError::InvalidTimestamp(ref v)) if v == padded),
                "{:?} should be rejected",
                padded
            );
        }
    }

    #[test]
    fn test_fractional_seconds_order() {
        let a = parse_instant("2018-07-01T12:34:56.100Z").unwrap();
        let b = parse_instant("2018-07-01T12:34:56.200Z").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_is_date_label() {
        assert!(is_date_label("2018-07-01"));
        assert!(!is_date_label("2018-7-1"));
        assert!(!is_date_label("notes"));
    }
}
