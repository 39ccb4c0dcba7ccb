//! Timestamp parsing and formatting utilities.
//!
//! Detection output timestamps use the `HH:MM:SS.mmm` form; parsing
//! additionally accepts `MM:SS` and bare-seconds inputs so request
//! parameters can be written loosely.

use thiserror::Error;

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("Timestamp cannot be empty")]
    Empty,

    #[error("Timestamp cannot be negative")]
    Negative,

    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid timestamp format '{0}'. Use HH:MM:SS, MM:SS, or SS (with optional .mmm)")]
    InvalidFormat(String),
}

/// Parse a timestamp string to total seconds.
///
/// Supports `HH:MM:SS[.mmm]`, `MM:SS[.mmm]` and `SS[.mmm]`.
///
/// # Examples
/// ```
/// use vgen_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("01:30:00").unwrap(), 5400.0);
/// assert_eq!(parse_timestamp("05:30").unwrap(), 330.0);
/// assert_eq!(parse_timestamp("90").unwrap(), 90.0);
/// ```
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    let parse_part = |label: &'static str, raw: &str| -> Result<f64, TimestampError> {
        raw.parse::<f64>()
            .map_err(|_| TimestampError::InvalidValue(label, raw.to_string()))
    };

    let total = match parts.len() {
        1 => parse_part("seconds", parts[0])?,
        2 => {
            let minutes = parse_part("minutes", parts[0])?;
            let seconds = parse_part("seconds", parts[1])?;
            if minutes < 0.0 || seconds < 0.0 {
                return Err(TimestampError::Negative);
            }
            minutes * 60.0 + seconds
        }
        3 => {
            let hours = parse_part("hours", parts[0])?;
            let minutes = parse_part("minutes", parts[1])?;
            let seconds = parse_part("seconds", parts[2])?;
            if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
                return Err(TimestampError::Negative);
            }
            hours * 3600.0 + minutes * 60.0 + seconds
        }
        _ => return Err(TimestampError::InvalidFormat(ts.to_string())),
    };

    if total < 0.0 {
        return Err(TimestampError::Negative);
    }
    Ok(total)
}

/// Format seconds as `HH:MM:SS.mmm`.
///
/// Milliseconds are always present, three digits, so output records
/// have a stable shape.
///
/// # Examples
/// ```
/// use vgen_models::timestamp::format_time;
/// assert_eq!(format_time(3661.5), "01:01:01.500");
/// assert_eq!(format_time(0.0), "00:00:00.000");
/// ```
pub fn format_time(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let total_ms = (total_secs * 1000.0).round() as u64;

    let hours = total_ms / 3_600_000;
    let mins = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_hh_mm_ss() {
        assert_eq!(parse_timestamp("00:00:00").unwrap(), 0.0);
        assert_eq!(parse_timestamp("00:01:00").unwrap(), 60.0);
        assert_eq!(parse_timestamp("01:00:00").unwrap(), 3600.0);
        assert_eq!(parse_timestamp("01:30:45").unwrap(), 5445.0);
    }

    #[test]
    fn test_parse_timestamp_mm_ss() {
        assert_eq!(parse_timestamp("05:30").unwrap(), 330.0);
        assert_eq!(parse_timestamp("53:53").unwrap(), 3233.0);
    }

    #[test]
    fn test_parse_timestamp_ss() {
        assert_eq!(parse_timestamp("90").unwrap(), 90.0);
        assert_eq!(parse_timestamp("0").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_timestamp_with_milliseconds() {
        let result = parse_timestamp("00:00:30.500").unwrap();
        assert!((result - 30.5).abs() < 0.001);
    }

    #[test]
    fn test_parse_timestamp_errors() {
        assert!(matches!(parse_timestamp(""), Err(TimestampError::Empty)));
        assert!(matches!(parse_timestamp("  "), Err(TimestampError::Empty)));
        assert!(matches!(
            parse_timestamp("abc"),
            Err(TimestampError::InvalidValue(_, _))
        ));
        assert!(matches!(
            parse_timestamp("1:2:3:4"),
            Err(TimestampError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_timestamp("-5"),
            Err(TimestampError::Negative)
        ));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00:00.000");
        assert_eq!(format_time(90.0), "00:01:30.000");
        assert_eq!(format_time(3661.5), "01:01:01.500");
        assert_eq!(format_time(12.345), "00:00:12.345");
    }

    #[test]
    fn test_format_time_rounds_milliseconds() {
        assert_eq!(format_time(1.0005), "00:00:01.001");
        assert_eq!(format_time(59.9996), "00:01:00.000");
    }

    #[test]
    fn test_parse_format_round_trip() {
        let secs = parse_timestamp("01:01:01.500").unwrap();
        assert_eq!(format_time(secs), "01:01:01.500");
    }
}
