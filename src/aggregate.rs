//! # Window aggregation
//! Per-minute moving average of event durations.
//!
//! For every tick `T` between `start` and `end` (inclusive, one minute apart)
//! the events with `T - window <= timestamp <= T` are averaged. An empty
//! window yields `0`. Means are rounded to one decimal, half to even.
//!
//! The event table is sorted, and both window bounds only move forward as `T`
//! advances, so two cursors replace a per-tick scan of the whole log.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};

use crate::events::{EventLog, EventRecord};
use crate::timestamp::serde_instant;

/// Distance between two ticks.
pub const TICK: TimeDelta = TimeDelta::minutes(1);

/// Averaged value for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    /// No events in the window; written as the integer `0`.
    Empty,
    /// Mean duration, already rounded to one decimal.
    Mean(f64),
}

impl Average {
    pub fn value(&self) -> f64 {
        match self {
            Average::Empty => 0.0,
            Average::Mean(v) => *v,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Average::Empty)
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Average::Empty => ser.serialize_u8(0),
            Average::Mean(v) => ser.serialize_f64(*v),
        }
    }
}

/// One emitted `(tick, average, window_size)` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    #[serde(with = "serde_instant")]
    pub date: NaiveDateTime,
    pub average_delivery_time: Average,
    pub window_size: i64,
}

/// Dense one-minute ticks from `start` to `end`, both inclusive.
#[derive(Debug, Clone)]
pub struct TickIter {
    next: Option<NaiveDateTime>,
    end: NaiveDateTime,
}

pub fn ticks(start: NaiveDateTime, end: NaiveDateTime) -> TickIter {
    TickIter {
        next: (start <= end).then_some(start),
        end,
    }
}

impl Iterator for TickIter {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .checked_add_signed(TICK)
            .filter(|n| *n <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(cur) => {
                let n = (self.end - cur).num_minutes();
                let n = usize::try_from(n).map_or(usize::MAX, |n| n.saturating_add(1));
                (n, Some(n))
            }
        }
    }
}

/// Round to one decimal place, ties to even (`0.25 -> 0.2`, `0.35 -> 0.4`).
pub fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

/// Lower window bound for `tick`, saturating at the representable range.
fn window_start(tick: NaiveDateTime, window_size_minutes: i64) -> NaiveDateTime {
    let saturated = if window_size_minutes < 0 {
        NaiveDateTime::MAX
    } else {
        NaiveDateTime::MIN
    };
    TimeDelta::try_minutes(window_size_minutes)
        .and_then(|span| tick.checked_sub_signed(span))
        .unwrap_or(saturated)
}

fn mean(window: &[EventRecord]) -> Average {
    if window.is_empty() {
        return Average::Empty;
    }
    let sum: f64 = window.iter().map(|e| e.duration).sum();
    Average::Mean(round_one_decimal(sum / window.len() as f64))
}

/// Compute one result record per tick in `[start, end]`.
///
/// Negative window sizes are not rejected here; they describe an empty window
/// so every tick averages `0`.
pub fn aggregate(
    events: &EventLog,
    window_size_minutes: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<ResultRecord> {
    let records = events.records();
    let mut out = Vec::with_capacity(ticks(start, end).size_hint().0.min(1 << 20));

    // lo: first event with ts >= lower bound; hi: first event with ts > tick.
    let mut lo = 0usize;
    let mut hi = 0usize;

    for tick in ticks(start, end) {
        let lower = window_start(tick, window_size_minutes);
        while lo < records.len() && records[lo].timestamp < lower {
            lo += 1;
        }
        while hi < records.len() && records[hi].timestamp <= tick {
            hi += 1;
        }
        let window = if lo < hi { &records[lo..hi] } else { &[][..] };

        out.push(ResultRecord {
            date: tick,
            average_delivery_time: mean(window),
            window_size: window_size_minutes,
        });
    }

    out
}
