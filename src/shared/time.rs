use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Utility for parsing time inputs from request parameters and CLI flags.
pub struct TimeParser;

impl TimeParser {
    /// Parse a string representing a time instant into epoch seconds (UTC).
    /// Supports RFC3339/ISO-8601, date-only (YYYY-MM-DD) and integer epochs.
    pub fn parse_str_to_epoch_seconds(input: &str) -> Option<i64> {
        let s = input.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc).timestamp());
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            let dt = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
            return Some(dt.timestamp());
        }
        if let Ok(num) = s.parse::<i128>() {
            return Self::normalize_integer_epoch(num);
        }
        None
    }

    pub fn parse_to_utc(input: &str) -> Option<DateTime<Utc>> {
        Self::parse_str_to_epoch_seconds(input).and_then(Self::from_epoch_seconds)
    }

    pub fn from_epoch_seconds(secs: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(secs, 0)
    }

    /// Heuristic normalization of integer magnitudes to seconds.
    /// - up to 11 digits: seconds
    /// - 12..=14: milliseconds
    /// - 15..=16: microseconds
    /// - 17..=19: nanoseconds
    fn normalize_integer_epoch(n: i128) -> Option<i64> {
        let digits = num_digits_u128(n.unsigned_abs());
        let secs = match digits {
            0..=11 => n,
            12..=14 => n / 1_000,
            15..=16 => n / 1_000_000,
            17..=19 => n / 1_000_000_000,
            _ => return None,
        };
        i64::try_from(secs).ok()
    }
}

fn num_digits_u128(mut x: u128) -> u32 {
    if x == 0 {
        return 1;
    }
    let mut c = 0;
    while x > 0 {
        x /= 10;
        c += 1;
    }
    c
}
