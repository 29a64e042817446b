//! Weight record persistence
//!
//! Each record is one store key, `weight_<YYYY-MM-DD>`, holding the weight
//! as a decimal string. Keying by date makes every save an upsert.

use crate::domain::WeightRecord;
use crate::error::{Result, WeightlogError};
use crate::infrastructure::{KeyValueStore, StoreDocument};
use chrono::NaiveDate;
use tracing::{info, warn};

pub const WEIGHT_KEY_PREFIX: &str = "weight_";

/// Record store for manual weight entries
#[derive(Debug, Clone)]
pub struct WeightRepository<S> {
    store: S,
}

impl<S: KeyValueStore> WeightRepository<S> {
    pub fn new(store: S) -> Self {
        WeightRepository { store }
    }

    /// Insert or overwrite the weight for `date`
    pub fn save_weight(&self, date: NaiveDate, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            return Err(WeightlogError::InvalidWeight(weight.to_string()));
        }

        self.store.update(|doc| {
            doc.insert(weight_key(date), weight.to_string());
            Ok(())
        })?;
        info!(%date, weight, "weight saved");
        Ok(())
    }

    /// Records sorted newest first, at most `limit` of them.
    /// A corrupt store reads as empty.
    pub fn all_weights(&self, limit: usize) -> Result<Vec<WeightRecord>> {
        let doc = match self.store.load() {
            Ok(doc) => doc,
            Err(WeightlogError::StorageRead(msg)) => {
                warn!(error = %msg, "weight store unreadable, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut records = records_from(&doc);
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(limit);
        Ok(records)
    }

    /// Remove the record for `date` if its weight is within tolerance of
    /// `weight`. Returns whether a record was removed.
    pub fn delete_weight(&self, date: NaiveDate, weight: f64) -> Result<bool> {
        let key = weight_key(date);
        let removed = self.store.update(|doc| {
            let matched = doc
                .get(&key)
                .and_then(|value| value.parse::<f64>().ok())
                .is_some_and(|stored| WeightRecord::new(date, stored).matches(date, weight));
            if matched {
                doc.remove(&key);
            }
            Ok(matched)
        })?;

        if removed {
            info!(%date, weight, "weight deleted");
        }
        Ok(removed)
    }
}

fn weight_key(date: NaiveDate) -> String {
    format!("{}{}", WEIGHT_KEY_PREFIX, date.format("%Y-%m-%d"))
}

fn records_from(doc: &StoreDocument) -> Vec<WeightRecord> {
    doc.iter()
        .filter_map(|(key, value)| {
            let date_str = key.strip_prefix(WEIGHT_KEY_PREFIX)?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok();
            let weight = value.parse::<f64>().ok().filter(|w| w.is_finite());
            match (date, weight) {
                (Some(date), Some(weight)) => Some(WeightRecord::new(date, weight)),
                _ => {
                    warn!(key = %key, value = %value, "skipping unreadable weight entry");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_save_is_upsert() {
        let repo = WeightRepository::new(MemoryStore::new());
        repo.save_weight(date(17), 70.0).unwrap();
        repo.save_weight(date(17), 71.0).unwrap();

        let records = repo.all_weights(30).unwrap();
        assert_eq!(records, vec![WeightRecord::new(date(17), 71.0)]);
    }

    #[test]
    fn test_negative_weight_accepted() {
        let repo = WeightRepository::new(MemoryStore::new());
        repo.save_weight(date(1), -3.5).unwrap();
        assert_eq!(repo.all_weights(30).unwrap()[0].weight, -3.5);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let repo = WeightRepository::new(MemoryStore::new());
        assert!(matches!(
            repo.save_weight(date(1), f64::NAN),
            Err(WeightlogError::InvalidWeight(_))
        ));
        assert!(repo.save_weight(date(1), f64::INFINITY).is_err());
        assert!(repo.all_weights(30).unwrap().is_empty());
    }

    #[test]
    fn test_all_weights_sorted_newest_first_and_limited() {
        let repo = WeightRepository::new(MemoryStore::new());
        for day in [5, 20, 1, 12, 30] {
            repo.save_weight(date(day), 70.0 + day as f64).unwrap();
        }

        let records = repo.all_weights(3).unwrap();
        let days: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(days, vec![date(30), date(20), date(12)]);

        assert_eq!(repo.all_weights(30).unwrap().len(), 5);
        assert!(repo.all_weights(0).unwrap().is_empty());
    }

    #[test]
    fn test_delete_within_tolerance() {
        let repo = WeightRepository::new(MemoryStore::new());
        repo.save_weight(date(17), 70.25).unwrap();
        repo.save_weight(date(18), 70.5).unwrap();

        assert!(repo.delete_weight(date(17), 70.2504).unwrap());
        assert_eq!(
            repo.all_weights(30).unwrap(),
            vec![WeightRecord::new(date(18), 70.5)]
        );
    }

    #[test]
    fn test_delete_without_match_changes_nothing() {
        let repo = WeightRepository::new(MemoryStore::new());
        repo.save_weight(date(17), 70.25).unwrap();

        assert!(!repo.delete_weight(date(17), 70.3).unwrap());
        assert!(!repo.delete_weight(date(16), 70.25).unwrap());
        assert_eq!(repo.all_weights(30).unwrap().len(), 1);
    }

    #[test]
    fn test_unreadable_entries_skipped() {
        let store = MemoryStore::new();
        store
            .update(|doc| {
                doc.insert("weight_2025-01-17".to_string(), "70.5".to_string());
                doc.insert("weight_2025-01-18".to_string(), "heavy".to_string());
                doc.insert("weight_yesterday".to_string(), "71".to_string());
                doc.insert("biometrics".to_string(), "[]".to_string());
                Ok(())
            })
            .unwrap();

        let repo = WeightRepository::new(&store);
        assert_eq!(
            repo.all_weights(30).unwrap(),
            vec![WeightRecord::new(date(17), 70.5)]
        );
    }

    #[test]
    fn test_corrupt_store_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("store.json"));
        std::fs::write(store.path(), "not json at all").unwrap();

        let repo = WeightRepository::new(store);
        assert!(repo.all_weights(30).unwrap().is_empty());
        assert!(matches!(
            repo.save_weight(date(1), 70.0),
            Err(WeightlogError::StorageRead(_))
        ));
    }

    #[test]
    fn test_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".weightlog").join("store.json");

        WeightRepository::new(FileStore::new(path.clone()))
            .save_weight(date(17), 69.9)
            .unwrap();

        let records = WeightRepository::new(FileStore::new(path))
            .all_weights(30)
            .unwrap();
        assert_eq!(records, vec![WeightRecord::new(date(17), 69.9)]);
    }
}
