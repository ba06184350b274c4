//! # Event log
//! Loads the newline-delimited JSON event log into memory.
//!
//! Each non-blank line is one object carrying at least `timestamp` and
//! `duration`; any other fields are ignored. The table is kept sorted by
//! timestamp so window lookups can be done with cursors instead of scans.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{MovingAverageError, Result};
use crate::timestamp::parse_instant;

/// One timestamped duration measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRecord {
    pub timestamp: NaiveDateTime,
    pub duration: f64,
}

impl EventRecord {
    pub fn new(timestamp: NaiveDateTime, duration: f64) -> Self {
        Self {
            timestamp,
            duration,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    timestamp: String,
    duration: f64,
}

/// Read-only, timestamp-ordered event table.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Build from in-memory records. Equal timestamps keep their given order.
    pub fn from_records(mut records: Vec<EventRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    /// Load an event log file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => MovingAverageError::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => MovingAverageError::InputUnreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let log = Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            MovingAverageError::InputUnreadable { source, .. } => {
                MovingAverageError::InputUnreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
            other => other,
        })?;

        info!(path = %path.display(), events = log.len(), "event log loaded");
        Ok(log)
    }

    /// Parse newline-delimited JSON from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut records = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| MovingAverageError::InputUnreadable {
                path: Default::default(),
                source,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            records.push(parse_line(trimmed, line_no)?);
        }

        debug!(events = records.len(), "parsed event lines");
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest timestamp in the log.
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.first().map(|r| r.timestamp)
    }

    /// Latest timestamp in the log.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.last().map(|r| r.timestamp)
    }

    /// Events with `lower <= timestamp <= upper`.
    pub fn in_window(&self, lower: NaiveDateTime, upper: NaiveDateTime) -> &[EventRecord] {
        let lo = self.records.partition_point(|r| r.timestamp < lower);
        let hi = self.records.partition_point(|r| r.timestamp <= upper);
        if lo >= hi {
            &[]
        } else {
            &self.records[lo..hi]
        }
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<EventRecord> {
    let raw: RawEvent =
        serde_json::from_str(line).map_err(|e| MovingAverageError::MalformedRecord {
            line: line_no,
            reason: e.to_string(),
        })?;

    let timestamp =
        parse_instant(&raw.timestamp).ok_or_else(|| MovingAverageError::MalformedRecord {
            line: line_no,
            reason: format!("unparseable timestamp {:?}", raw.timestamp),
        })?;

    Ok(EventRecord::new(timestamp, raw.duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = r#"{"timestamp": "2018-12-26 18:11:08.509654","translation_id": "5aa5b2f39f7254a75aa5","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 20}
{"timestamp": "2018-12-26 18:15:19.903159","translation_id": "5aa5b2f39f7254a75aa4","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 31}

{"timestamp": "2018-12-26 18:23:19.903159","translation_id": "5aa5b2f39f7254a75bb3","source_language": "en","target_language": "fr","client_name": "taxi-eats","event_name": "translation_delivered","nr_words": 100, "duration": 54}
"#;

    #[test]
    fn parses_lines_and_skips_blanks() {
        let log = EventLog::from_reader(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log.records()[0].duration, 20.0);
        assert_eq!(log.records()[2].duration, 54.0);
        assert_eq!(
            log.first_timestamp(),
            parse_instant("2018-12-26 18:11:08.509654")
        );
        assert_eq!(
            log.last_timestamp(),
            parse_instant("2018-12-26 18:23:19.903159")
        );
    }

    #[test]
    fn out_of_order_lines_are_sorted() {
        let input = r#"{"timestamp": "2020-01-01 00:05:00", "duration": 3}
{"timestamp": "2020-01-01 00:01:00", "duration": 1.5}
"#;
        let log = EventLog::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(log.records()[0].duration, 1.5);
        assert_eq!(log.first_timestamp(), parse_instant("2020-01-01 00:01:00"));
    }

    #[test]
    fn missing_field_reports_line() {
        let input = "{\"timestamp\": \"2020-01-01 00:00:00\", \"duration\": 1}\n{\"timestamp\": \"2020-01-01 00:01:00\"}\n";
        let err = EventLog::from_reader(Cursor::new(input)).unwrap_err();
        match err {
            MovingAverageError::MalformedRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("duration"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let input = "{\"timestamp\": \"not a date\", \"duration\": 1}\n";
        let err = EventLog::from_reader(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, MovingAverageError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn window_lookup_is_inclusive() {
        let t = |s: &str| parse_instant(s).unwrap();
        let log = EventLog::from_records(vec![
            EventRecord::new(t("2020-01-01 00:00"), 1.0),
            EventRecord::new(t("2020-01-01 00:02"), 2.0),
            EventRecord::new(t("2020-01-01 00:05"), 3.0),
        ]);
        let hit = log.in_window(t("2020-01-01 00:00"), t("2020-01-01 00:02"));
        assert_eq!(hit.len(), 2);
        assert!(log
            .in_window(t("2020-01-01 00:03"), t("2020-01-01 00:04"))
            .is_empty());
        assert!(log
            .in_window(t("2020-01-01 00:05"), t("2020-01-01 00:00"))
            .is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = EventLog::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, MovingAverageError::InputNotFound { .. }));
    }
}
