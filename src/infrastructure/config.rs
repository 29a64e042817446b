//! Configuration management

use crate::domain::TimeRange;
use crate::error::{Result, WeightlogError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the data directory inside a log root
pub const DATA_DIR: &str = ".weightlog";

/// Number of weight records loaded for the table and charts
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_range: TimeRange,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub created: DateTime<Utc>,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_range: TimeRange::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_level: default_log_level(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Create a new config with the given default range
    pub fn new(default_range: TimeRange) -> Self {
        Config {
            default_range,
            ..Config::default()
        }
    }

    /// Load config from .weightlog/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(DATA_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WeightlogError::NotWeightlogDirectory(path.to_path_buf())
            } else {
                WeightlogError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| WeightlogError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .weightlog/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let data_dir = path.join(DATA_DIR);
        let config_path = data_dir.join("config.toml");

        if !data_dir.exists() {
            fs::create_dir(&data_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| WeightlogError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}
