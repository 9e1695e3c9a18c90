use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

/// Application configuration loaded from TOML config file.
/// All fields have sensible defaults — the config file is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory to index when `--dir` is not given.
    pub sample_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load config from `~/.config/sampledex/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from an explicit path, falling back to defaults on error.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// `~/Splice/sounds`, if it exists.
pub fn default_sample_dir() -> Option<PathBuf> {
    let dir = BaseDirs::new()?.home_dir().join("Splice").join("sounds");
    dir.is_dir().then_some(dir)
}

/// Resolve the directory to index: CLI > config > Splice default.
pub fn resolve_sample_dir(cli: Option<PathBuf>, config: &AppConfig) -> Option<PathBuf> {
    cli.or_else(|| config.sample_dir.clone())
        .or_else(default_sample_dir)
}
