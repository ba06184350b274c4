//! Instant parsing and formatting.
//!
//! All instants are zone-less `NaiveDateTime`s. Inputs that carry an offset
//! are converted to UTC before the offset is dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Date-time layouts tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp string. Returns `None` when no known layout matches.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Drop seconds and sub-seconds.
pub fn floor_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t.with_second(0)
        .and_then(|m| m.with_nanosecond(0))
        .unwrap_or(t)
}

/// `2018-12-26 18:11:00`, with a fractional part only when one is present.
pub fn format_instant(t: &NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

/// `20181226`, used in output file names.
pub fn compact_date(t: &NaiveDateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Serde adapter writing instants in the `format_instant` layout.
pub mod serde_instant {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&super::format_instant(t))
    }
}
