// src/pipeline.rs
//! Load → aggregate → write, end to end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::aggregate::{aggregate, ResultRecord, TICK};
use crate::config::AppConfig;
use crate::error::MovingAverageError;
use crate::events::EventLog;
use crate::output::{render_jsonl, write_rendered};
use crate::params::Parameters;
use crate::timestamp::{floor_to_minute, format_instant};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub records: Vec<ResultRecord>,
    /// Exactly what was written to `output_path`.
    pub rendered: String,
}

/// Series range for a loaded log: `start` is the limit date or the first
/// event's minute; `end` is one minute past the last event's minute.
pub fn series_range(
    events: &EventLog,
    limit_date: Option<NaiveDateTime>,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let first = floor_to_minute(events.first_timestamp()?);
    let last = floor_to_minute(events.last_timestamp()?);
    let end = last.checked_add_signed(TICK).unwrap_or(last);
    Some((limit_date.unwrap_or(first), end))
}

pub fn run(params: &Parameters, cfg: &AppConfig) -> Result<RunSummary> {
    let input_path = params.input.resolve(cfg);
    let events = EventLog::load(&input_path)?;

    let (start, end) = series_range(&events, params.limit_date).ok_or_else(|| {
        MovingAverageError::EmptyInput {
            path: input_path.clone(),
        }
    })?;
    if start > end {
        warn!(
            start = %format_instant(&start),
            end = %format_instant(&end),
            "limit date is after the last event; series is empty"
        );
    }

    let records = aggregate(&events, params.window_size, start, end);
    info!(
        window_size = params.window_size,
        ticks = records.len(),
        "moving average computed"
    );

    let rendered = render_jsonl(&records)?;
    let output_path = write_rendered(&cfg.output_dir, &end, params.window_size, &rendered)
        .context("writing moving average output")?;

    Ok(RunSummary {
        input_path,
        output_path,
        start,
        end,
        records,
        rendered,
    })
}
