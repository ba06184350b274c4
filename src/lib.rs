// src/lib.rs
// Public library surface for the binary and the integration tests.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod output;
pub mod params;
pub mod pipeline;
pub mod timestamp;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate, Average, ResultRecord};
pub use crate::config::{AppConfig, InputLocation};
pub use crate::error::MovingAverageError;
pub use crate::events::{EventLog, EventRecord};
pub use crate::params::Parameters;
pub use crate::pipeline::{run, RunSummary};
