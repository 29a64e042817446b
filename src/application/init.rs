//! Initialize log use case

use crate::domain::TimeRange;
use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, LogRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new weight log at the specified path.
pub fn init(path: &Path, default_range: TimeRange) -> Result<FileSystemRepository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new(default_range))?;

    info!(root = %path.display(), range = %default_range, "weight log initialized");
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("log");

        let repo = init(&target, TimeRange::Monthly).unwrap();

        assert!(target.join(".weightlog/config.toml").exists());
        assert_eq!(repo.root(), target.as_path());
        assert_eq!(
            repo.load_config().unwrap().default_range,
            TimeRange::Monthly
        );
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), TimeRange::Weekly).unwrap();
        assert!(init(temp.path(), TimeRange::Weekly).is_err());
    }
}
