//! Biometric record persistence

use crate::domain::BiometricRecord;
use crate::error::{Result, WeightlogError};
use crate::infrastructure::KeyValueStore;
use std::collections::BTreeMap;
use tracing::warn;

/// Store key holding the JSON array of biometric records
pub const BIOMETRICS_KEY: &str = "biometrics";

/// Secondary store for imported biometric records
#[derive(Debug, Clone)]
pub struct BiometricRepository<S> {
    store: S,
}

impl<S: KeyValueStore> BiometricRepository<S> {
    pub fn new(store: S) -> Self {
        BiometricRepository { store }
    }

    /// Every stored record, in stored order. Corrupt data reads as empty.
    pub fn load(&self) -> Result<Vec<BiometricRecord>> {
        let value = match self.store.get(BIOMETRICS_KEY) {
            Ok(value) => value,
            Err(WeightlogError::StorageRead(msg)) => {
                warn!(error = %msg, "biometric store unreadable, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        match value.as_deref().map(decode).transpose() {
            Ok(records) => Ok(records.unwrap_or_default()),
            Err(e) => {
                warn!(error = %e, "biometric records unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the stored set wholesale. Returns the stored count.
    pub fn replace_all(&self, records: &[BiometricRecord]) -> Result<usize> {
        let encoded = serde_json::to_string(records)?;
        self.store.update(|doc| {
            doc.insert(BIOMETRICS_KEY.to_string(), encoded);
            Ok(records.len())
        })
    }

    /// Upsert `records` by date into the stored set, keeping it sorted by
    /// date. Returns the stored count.
    pub fn merge(&self, records: &[BiometricRecord]) -> Result<usize> {
        self.store.update(|doc| {
            let existing = match doc.get(BIOMETRICS_KEY) {
                Some(value) => decode(value)?,
                None => Vec::new(),
            };

            let mut by_date: BTreeMap<_, BiometricRecord> =
                existing.into_iter().map(|r| (r.date, r)).collect();
            for record in records {
                by_date
                    .entry(record.date)
                    .and_modify(|stored| stored.metrics.extend(record.metrics.clone()))
                    .or_insert_with(|| record.clone());
            }

            let merged: Vec<BiometricRecord> = by_date.into_values().collect();
            doc.insert(BIOMETRICS_KEY.to_string(), serde_json::to_string(&merged)?);
            Ok(merged.len())
        })
    }
}

fn decode(value: &str) -> Result<Vec<BiometricRecord>> {
    serde_json::from_str(value).map_err(|e| WeightlogError::StorageRead(e.to_string()))
}
