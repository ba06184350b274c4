// src/output.rs
//! Writes result records as newline-delimited JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::info;

use crate::aggregate::ResultRecord;
use crate::timestamp::compact_date;

/// `events_<YYYYMMDD>_<window>.json`
pub fn output_file_name(last_tick: &NaiveDateTime, window_size: i64) -> String {
    format!("events_{}_{}.json", compact_date(last_tick), window_size)
}

/// One compact JSON object per line, each line newline-terminated.
pub fn render_jsonl(records: &[ResultRecord]) -> Result<String> {
    let mut out = String::new();
    for r in records {
        let line = serde_json::to_string(r).context("serializing result record")?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Write already rendered content into `dir`, creating it when needed.
pub fn write_rendered(
    dir: &Path,
    last_tick: &NaiveDateTime,
    window_size: i64,
    content: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(output_file_name(last_tick, window_size));
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "output written");
    Ok(path)
}

/// Render and write `records`; returns the file path.
pub fn write_output(
    dir: &Path,
    last_tick: &NaiveDateTime,
    window_size: i64,
    records: &[ResultRecord],
) -> Result<PathBuf> {
    let content = render_jsonl(records)?;
    write_rendered(dir, last_tick, window_size, &content)
}
