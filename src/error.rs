//! Error types for weightlog

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for weightlog application
#[derive(Debug, Error)]
pub enum WeightlogError {
    #[error("Not a weightlog directory: {0}")]
    NotWeightlogDirectory(PathBuf),

    #[error("INVALID_CSV_FORMAT: missing required columns: {}", .missing.join(", "))]
    InvalidFormat { missing: Vec<String> },

    #[error("Could not read import file: {0}")]
    Parse(String),

    #[error("Corrupt stored data: {0}")]
    StorageRead(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("No weight entry matches {0}")]
    EntryNotFound(String),

    #[error("Store is locked by another weightlog process: {0}")]
    StoreBusy(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl WeightlogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            WeightlogError::NotWeightlogDirectory(_) => 2,
            WeightlogError::InvalidDate(_)
            | WeightlogError::InvalidWeight(_)
            | WeightlogError::InvalidRange(_) => 3,
            WeightlogError::InvalidFormat { .. } | WeightlogError::Parse(_) => 4,
            WeightlogError::StoreBusy(_) => 5,
            WeightlogError::EntryNotFound(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            WeightlogError::NotWeightlogDirectory(path) => {
                format!(
                    "Not a weightlog directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'weightlog init' in this directory to create a new log\n\
                    • Navigate to an existing weightlog directory\n\
                    • Set WEIGHTLOG_ROOT environment variable to your log path",
                    path.display()
                )
            }
            WeightlogError::InvalidFormat { .. } => {
                format!(
                    "{}\n\n\
                    The first line of the file must be a header containing:\n\
                    date,weight,bodyFat,muscleMass,bmi\n\
                    (any order, case-insensitive, extra columns are ignored)",
                    self
                )
            }
            WeightlogError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, last friday, etc.\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2025-01-17)",
                    input
                )
            }
            WeightlogError::InvalidRange(input) => {
                format!(
                    "Invalid range: '{}'\n\n\
                    Valid ranges: weekly, monthly, yearly, all\n\
                    Example: weightlog stats --range monthly",
                    input
                )
            }
            WeightlogError::EntryNotFound(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Use 'weightlog list' to see recorded dates and weights\n\
                    • The weight must match the stored value within 0.001 kg",
                    self
                )
            }
            WeightlogError::StoreBusy(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Wait for the other weightlog command to finish, then retry",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using WeightlogError
pub type Result<T> = std::result::Result<T, WeightlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_weightlog_directory_suggestion() {
        let err = WeightlogError::NotWeightlogDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("weightlog init"));
        assert!(msg.contains("WEIGHTLOG_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_invalid_format_names_missing_columns() {
        let err = WeightlogError::InvalidFormat {
            missing: vec!["bodyFat".to_string(), "bmi".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "INVALID_CSV_FORMAT: missing required columns: bodyFat, bmi"
        );
        assert!(err
            .display_with_suggestions()
            .contains("date,weight,bodyFat,muscleMass,bmi"));
    }

    #[test]
    fn test_invalid_date_examples() {
        let err = WeightlogError::InvalidDate("baddate".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("yesterday"));
        assert!(msg.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_invalid_range_suggestions() {
        let err = WeightlogError::InvalidRange("daily".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("weekly, monthly, yearly, all"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            WeightlogError::NotWeightlogDirectory(PathBuf::from(".")).exit_code(),
            2
        );
        assert_eq!(WeightlogError::InvalidWeight("x".into()).exit_code(), 3);
        assert_eq!(WeightlogError::Parse("x".into()).exit_code(), 4);
        assert_eq!(WeightlogError::EntryNotFound("x".into()).exit_code(), 6);
        assert_eq!(WeightlogError::Config("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = WeightlogError::Config("bad value".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Configuration error: bad value");
    }
}
