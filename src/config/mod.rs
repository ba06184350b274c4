// src/config/mod.rs
//! Runtime configuration: where bare input names resolve to and where output
//! files are written. Built once at startup and passed down explicitly.

pub mod input;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{MovingAverageError, Result};

pub use input::InputLocation;

pub const ENV_CONFIG_PATH: &str = "MOVING_AVG_CONFIG";
pub const ENV_INPUT_ROOT: &str = "MOVING_AVG_INPUT_ROOT";
pub const ENV_OUTPUT_DIR: &str = "MOVING_AVG_OUTPUT_DIR";
pub const DEFAULT_CONFIG_PATH: &str = "config/moving_average.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory that bare input file names are resolved under.
    pub input_root: PathBuf,
    /// Directory that result files are written to.
    pub output_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    input_root: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults relative to a home directory: `~/Desktop` and `~/Desktop/Outputs`.
    pub fn with_home(home: &Path) -> Self {
        let desktop = home.join("Desktop");
        Self {
            output_dir: desktop.join("Outputs"),
            input_root: desktop,
        }
    }

    /// Load using the user's home directory for defaults.
    pub fn load() -> Result<Self> {
        Self::load_with_home(dirs::home_dir())
    }

    /// Layering, lowest to highest: home defaults, TOML file, environment.
    ///
    /// The TOML file is `$MOVING_AVG_CONFIG` (must exist when set) or
    /// `config/moving_average.toml` when present.
    pub fn load_with_home(home: Option<PathBuf>) -> Result<Self> {
        let defaults = home.as_deref().map(Self::with_home);
        let mut input_root = defaults.as_ref().map(|d| d.input_root.clone());
        let mut output_dir = defaults.map(|d| d.output_dir);

        if let Some(file) = load_file_config()? {
            if file.input_root.is_some() {
                input_root = file.input_root;
            }
            if file.output_dir.is_some() {
                output_dir = file.output_dir;
            }
        }

        if let Some(p) = env_path(ENV_INPUT_ROOT) {
            input_root = Some(p);
        }
        if let Some(p) = env_path(ENV_OUTPUT_DIR) {
            output_dir = Some(p);
        }

        match (input_root, output_dir) {
            (Some(input_root), Some(output_dir)) => {
                debug!(
                    input_root = %input_root.display(),
                    output_dir = %output_dir.display(),
                    "configuration resolved"
                );
                Ok(Self {
                    input_root,
                    output_dir,
                })
            }
            _ => Err(MovingAverageError::Config(format!(
                "unable to determine home directory; set {ENV_INPUT_ROOT} and {ENV_OUTPUT_DIR}"
            ))),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn load_file_config() -> Result<Option<FileConfig>> {
    if let Some(p) = env_path(ENV_CONFIG_PATH) {
        if !p.exists() {
            return Err(MovingAverageError::Config(format!(
                "{ENV_CONFIG_PATH} points to non-existent path {}",
                p.display()
            )));
        }
        return read_file_config(&p).map(Some);
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
    if fallback.exists() {
        return read_file_config(&fallback).map(Some);
    }
    Ok(None)
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        MovingAverageError::Config(format!("reading {}: {e}", path.display()))
    })?;
    toml::from_str(&content)
        .map_err(|e| MovingAverageError::Config(format!("parsing {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_env() {
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_INPUT_ROOT);
        env::remove_var(ENV_OUTPUT_DIR);
    }

    #[test]
    fn home_defaults() {
        let cfg = AppConfig::with_home(Path::new("/home/ana"));
        assert_eq!(cfg.input_root, PathBuf::from("/home/ana/Desktop"));
        assert_eq!(cfg.output_dir, PathBuf::from("/home/ana/Desktop/Outputs"));
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_file_overrides_home() {
        // Keep the repo's own config/ out of the picture
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        clear_env();

        let cfg = AppConfig::load_with_home(Some(PathBuf::from("/home/ana"))).unwrap();
        assert_eq!(cfg, AppConfig::with_home(Path::new("/home/ana")));

        // Fallback file in ./config/
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_PATH),
            r#"output_dir = "/srv/averages""#,
        )
        .unwrap();
        let cfg = AppConfig::load_with_home(Some(PathBuf::from("/home/ana"))).unwrap();
        assert_eq!(cfg.input_root, PathBuf::from("/home/ana/Desktop"));
        assert_eq!(cfg.output_dir, PathBuf::from("/srv/averages"));

        // Environment wins
        env::set_var(ENV_OUTPUT_DIR, "/tmp/out");
        let cfg = AppConfig::load_with_home(Some(PathBuf::from("/home/ana"))).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/out"));

        clear_env();
        env::set_current_dir(&old).unwrap();
    }

    #[serial_test::serial]
    #[test]
    fn missing_home_without_overrides_fails() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        clear_env();

        let err = AppConfig::load_with_home(None).unwrap_err();
        assert!(matches!(err, MovingAverageError::Config(_)));

        env::set_var(ENV_INPUT_ROOT, "/data/in");
        env::set_var(ENV_OUTPUT_DIR, "/data/out");
        let cfg = AppConfig::load_with_home(None).unwrap();
        assert_eq!(cfg.input_root, PathBuf::from("/data/in"));

        clear_env();
        env::set_current_dir(&old).unwrap();
    }

    #[serial_test::serial]
    #[test]
    fn explicit_config_path_must_exist() {
        clear_env();
        env::set_var(ENV_CONFIG_PATH, "/definitely/not/here.toml");
        let err = AppConfig::load_with_home(Some(PathBuf::from("/home/ana"))).unwrap_err();
        assert!(err.to_string().contains(ENV_CONFIG_PATH));
        clear_env();
    }
}
