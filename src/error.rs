// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the moving-average job. Every one of them is terminal.
#[derive(Debug, Error)]
pub enum MovingAverageError {
    #[error("invalid window_size {value:?}: expected an integer number of minutes")]
    InvalidWindowSize { value: String },

    #[error("invalid limit_date {value:?}: not a recognizable date")]
    InvalidLimitDate { value: String },

    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("cannot read input file {}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input file {} contains no events", path.display())]
    EmptyInput { path: PathBuf },

    #[error("malformed event on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl MovingAverageError {
    /// Process exit code: 2 for bad parameters, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidWindowSize { .. } | Self::InvalidLimitDate { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T, E = MovingAverageError> = std::result::Result<T, E>;
