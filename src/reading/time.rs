//! Timestamp parsing.

use anyhow::{Error, Result};
use chrono::{DateTime, NaiveDateTime};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d/%H:%M:%S%.f"];

/// Parses a timestamp into seconds since the Unix epoch.
///
/// Accepts plain seconds, RFC 3339, or a date and time without offset (read
/// as UTC) separated by `T`, a space or `/`.
pub fn parse_time(s: &str) -> Result<f64> {
    let s = s.trim();

    if let Ok(seconds) = s.parse::<f64>() {
        return Ok(seconds);
    }

    if let Ok(time) = DateTime::parse_from_rfc3339(s) {
        return Ok(to_seconds(time.timestamp(), time.timestamp_subsec_nanos()));
    }

    for format in NAIVE_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(s, format) {
            let time = time.and_utc();
            return Ok(to_seconds(time.timestamp(), time.timestamp_subsec_nanos()));
        }
    }

    Err(Error::msg(format!("Unrecognised timestamp: `{}`", s)))
}

fn to_seconds(seconds: i64, nanos: u32) -> f64 {
    seconds as f64 + nanos as f64 * 1e-9
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_parse_epoch_seconds() {
        assert_eq!(parse_time(" 1445000000.5 ").unwrap(), 1_445_000_000.5);
    }

    #[test]
    fn should_parse_rfc3339() {
        assert_eq!(parse_time("2015-10-16T13:00:00Z").unwrap(), 1_445_000_400.0);
        assert_eq!(parse_time("2015-10-16T14:00:00+01:00").unwrap(), 1_445_000_400.0);
    }

    #[test]
    fn should_parse_naive_as_utc() {
        assert_eq!(parse_time("2015-10-16T13:00:00").unwrap(), 1_445_000_400.0);
        assert_eq!(parse_time("2015-10-16/13:00:00.25").unwrap(), 1_445_000_400.25);
        assert_eq!(parse_time("2015-10-16 13:00:00").unwrap(), 1_445_000_400.0);
    }

    #[test]
    fn should_reject_garbage() {
        assert!(parse_time("yesterday").is_err());
    }
}
