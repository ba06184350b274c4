// src/params.rs
use chrono::NaiveDateTime;

use crate::cli::CliArgs;
use crate::config::InputLocation;
use crate::error::{MovingAverageError, Result};
use crate::timestamp::parse_instant;

/// Validated job parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub input: InputLocation,
    pub window_size: i64,
    pub limit_date: Option<NaiveDateTime>,
}

impl Parameters {
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let window_size = parse_window_size(&args.window_size)?;
        let limit_date = args
            .limit_date
            .as_deref()
            .map(|raw| {
                parse_instant(raw).ok_or_else(|| MovingAverageError::InvalidLimitDate {
                    value: raw.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            input: InputLocation::parse(&args.input_file),
            window_size,
            limit_date,
        })
    }
}

fn parse_window_size(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| MovingAverageError::InvalidWindowSize {
            value: raw.to_string(),
        })
}
