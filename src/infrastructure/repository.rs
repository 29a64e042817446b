//! File system repository

use crate::error::{Result, WeightlogError};
use crate::infrastructure::config::DATA_DIR;
use crate::infrastructure::{Config, FileStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that pins the log root
pub const ROOT_ENV_VAR: &str = "WEIGHTLOG_ROOT";

const STORE_FILE: &str = "store.json";

/// Abstract repository for log directory operations
pub trait LogRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .weightlog/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .weightlog/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .weightlog directory exists
    fn is_initialized(&self) -> bool;

    /// Create .weightlog directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of LogRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the log root by walking up from current directory.
    /// WEIGHTLOG_ROOT takes precedence when set.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV_VAR) {
            let path = PathBuf::from(root_path);
            if Self::has_data_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(WeightlogError::Config(format!(
                    "{} is set to '{}' but no .weightlog directory found. \
                    Run 'weightlog init' in that directory or unset {}.",
                    ROOT_ENV_VAR,
                    path.display(),
                    ROOT_ENV_VAR
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the log root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_data_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(WeightlogError::NotWeightlogDirectory(start.to_path_buf())),
            }
        }
    }

    /// The key-value store holding weight and biometric records
    pub fn store(&self) -> FileStore {
        FileStore::new(self.root.join(DATA_DIR).join(STORE_FILE))
    }

    fn has_data_dir(path: &Path) -> bool {
        path.join(DATA_DIR).is_dir()
    }
}

impl LogRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_data_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(WeightlogError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(self.root.join(DATA_DIR))?;
        Ok(())
    }
}
