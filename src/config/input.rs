// src/config/input.rs
use std::path::PathBuf;

use super::AppConfig;

/// How the `--input_file` argument is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLocation {
    /// Argument contains a path separator; used as given.
    ExplicitPath(PathBuf),
    /// Plain file name, looked up under `AppConfig::input_root`.
    BareName(String),
}

impl InputLocation {
    /// Both `/` and `\` count as separators, whatever the host platform.
    pub fn parse(arg: &str) -> Self {
        if arg.contains(['/', '\\']) {
            Self::ExplicitPath(PathBuf::from(arg))
        } else {
            Self::BareName(arg.to_string())
        }
    }

    pub fn resolve(&self, cfg: &AppConfig) -> PathBuf {
        match self {
            Self::ExplicitPath(p) => p.clone(),
            Self::BareName(name) => cfg.input_root.join(name),
        }
    }
}
