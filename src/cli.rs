// src/cli.rs
use clap::Parser;

/// Raw command-line arguments. Values are validated by `params::Parameters`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "moving-average",
    version,
    about = "Per-minute moving average of event durations"
)]
pub struct CliArgs {
    /// Event log: a path, or a bare file name looked up in the input root
    #[arg(long = "input_file")]
    pub input_file: String,

    /// Window size in minutes
    #[arg(long = "window_size", allow_hyphen_values = true)]
    pub window_size: String,

    /// First tick of the series (defaults to the earliest event, floored to the minute)
    #[arg(long = "limit_date")]
    pub limit_date: Option<String>,
}
