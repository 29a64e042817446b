//! Biometric CSV import use case
//!
//! Reads a `.csv` file, parses it into typed records and persists them in
//! one store transaction. Any error aborts the import before anything is
//! written. Subscribed listeners are notified after each successful import.

use crate::domain::parse_csv;
use crate::error::{Result, WeightlogError};
use crate::infrastructure::{BiometricRepository, KeyValueStore};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// How imported records combine with the stored set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Stored records are discarded
    #[default]
    Replace,
    /// Imported records are upserted by date
    Merge,
}

/// Result of a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Valid rows written to the store
    pub imported: usize,
    /// Data rows dropped during parsing
    pub rejected: usize,
    /// Records held by the store afterwards
    pub stored: usize,
}

type ImportListener = Box<dyn Fn(&ImportSummary)>;

/// Service for importing biometric CSV files
pub struct ImportBiometricsService<S> {
    repository: BiometricRepository<S>,
    listeners: Vec<ImportListener>,
}

impl<S: KeyValueStore> ImportBiometricsService<S> {
    pub fn new(store: S) -> Self {
        ImportBiometricsService {
            repository: BiometricRepository::new(store),
            listeners: Vec::new(),
        }
    }

    /// Register a callback fired after every successful import
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&ImportSummary) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Import a `.csv` file from disk
    pub fn import_file(&self, path: &Path, mode: ImportMode) -> Result<ImportSummary> {
        if !has_csv_extension(path) {
            return Err(WeightlogError::Parse(format!(
                "{} is not a .csv file",
                path.display()
            )));
        }

        let text = fs::read_to_string(path)
            .map_err(|e| WeightlogError::Parse(format!("{}: {}", path.display(), e)))?;

        self.import_text(&text, mode, Utc::now())
    }

    /// Import CSV text already in memory
    pub fn import_text(
        &self,
        text: &str,
        mode: ImportMode,
        captured_at: DateTime<Utc>,
    ) -> Result<ImportSummary> {
        let import = match parse_csv(text, captured_at) {
            Ok(import) => import,
            Err(e) => {
                warn!(error = %e, "biometric import rejected");
                return Err(e);
            }
        };

        for row in &import.rejected {
            warn!(line = row.line, reason = %row.reason, "dropping CSV row");
        }

        let stored = match mode {
            ImportMode::Replace => self.repository.replace_all(&import.records)?,
            ImportMode::Merge => self.repository.merge(&import.records)?,
        };

        let summary = ImportSummary {
            imported: import.records.len(),
            rejected: import.rejected.len(),
            stored,
        };
        info!(
            imported = summary.imported,
            rejected = summary.rejected,
            stored = summary.stored,
            ?mode,
            "biometric import complete"
        );

        for listener in &self.listeners {
            listener(&summary);
        }

        Ok(summary)
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
