//! Manual weight entry use cases

use crate::domain::{resolve_date, WeightRecord};
use crate::error::Result;
use crate::infrastructure::{KeyValueStore, WeightRepository};
use chrono::NaiveDate;

/// Service for adding, listing and deleting weight entries
pub struct WeightService<S> {
    repository: WeightRepository<S>,
}

impl<S: KeyValueStore> WeightService<S> {
    pub fn new(store: S) -> Self {
        WeightService {
            repository: WeightRepository::new(store),
        }
    }

    /// Record `weight` for the day `date_ref` resolves to against `today`.
    /// Returns the stored record.
    pub fn add(&self, date_ref: &str, weight: f64, today: NaiveDate) -> Result<WeightRecord> {
        let date = resolve_date(date_ref, today)?;
        self.repository.save_weight(date, weight)?;
        Ok(WeightRecord::new(date, weight))
    }

    /// Newest entries first
    pub fn list(&self, limit: usize) -> Result<Vec<WeightRecord>> {
        self.repository.all_weights(limit)
    }

    /// Delete the entry matching `date_ref` and `weight`. Returns whether
    /// an entry was removed.
    pub fn delete(&self, date_ref: &str, weight: f64, today: NaiveDate) -> Result<bool> {
        let date = resolve_date(date_ref, today)?;
        self.repository.delete_weight(date, weight)
    }
}
