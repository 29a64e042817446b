//! Config management use case

use crate::domain::TimeRange;
use crate::error::{Result, WeightlogError};
use crate::infrastructure::logging::normalize_level;
use crate::infrastructure::{Config, FileSystemRepository, LogRepository};
use std::str::FromStr;

const VALID_KEYS: &str = "default_range, history_limit, log_level";

/// Service for managing log configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "default_range" => Ok(config.default_range.to_string()),
            "history_limit" => Ok(config.history_limit.to_string()),
            "log_level" => Ok(config.log_level),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "default_range" => {
                config.default_range = TimeRange::from_str(value)
                    .map_err(|_| WeightlogError::InvalidRange(value.to_string()))?;
            }
            "history_limit" => {
                config.history_limit = value.parse().map_err(|_| {
                    WeightlogError::Config(format!(
                        "history_limit must be a non-negative integer, got '{}'",
                        value
                    ))
                })?;
            }
            "log_level" => {
                config.log_level = normalize_level(value).to_string();
            }
            "created" => {
                return Err(WeightlogError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> WeightlogError {
    WeightlogError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}
