use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::identifiers::Timestamp;
use crate::validation::ValidationError;

const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

impl Timestamp {
    /// Current time, whole seconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Formats a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`, dropping sub-seconds.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Timestamp::new(instant.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }

    /// Parses any of the accepted date layouts and normalizes it to UTC.
    ///
    /// Inputs without an offset are taken to be UTC already. Date-only inputs
    /// resolve to midnight.
    pub fn parse_lenient(input: &str) -> Result<Self, ValidationError> {
        parse_instant(input)
            .map(Self::from_datetime)
            .ok_or_else(|| ValidationError::Unparsable(input.to_string()))
    }

    /// The instant this timestamp denotes, if it is well formed.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.as_str())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// True when `input` is accepted by [`Timestamp::parse_lenient`].
pub fn is_parsable(input: &str) -> bool {
    parse_instant(input).is_some()
}

/// Digit runs this long or longer are epoch milliseconds.
const EPOCH_MILLIS_DIGITS: usize = 13;

/// Only four-digit years fit the `Timestamp` layout.
fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    parse_any(input).filter(|instant| (0..=9999).contains(&instant.year()))
}

fn parse_any(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(s, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    // Pure digits: eight of them is a compact date, thirteen or more epoch
    // milliseconds, anything else epoch seconds.
    if s.chars().all(|c| c.is_ascii_digit()) && s.len() != 8 {
        let value = s.parse::<i64>().ok()?;
        return if s.len() >= EPOCH_MILLIS_DIGITS {
            DateTime::from_timestamp_millis(value)
        } else {
            DateTime::from_timestamp(value, 0)
        };
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(s, layout) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    None
}
