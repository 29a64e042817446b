//! Dashboard use case
//!
//! Builds every displayed value from a fresh snapshot of both stores. The
//! selected range is passed in explicitly; nothing is cached between calls.

use crate::domain::stats::{
    bmi_trend, chart_series, compute_stats, muscle_fat_ratio, weekly_body_fat, ChartPoint, Trend,
    WeightStats,
};
use crate::domain::{TimeRange, WeightRecord};
use crate::error::Result;
use crate::infrastructure::{BiometricRepository, KeyValueStore, WeightRepository};
use chrono::NaiveDate;

/// Biometric indicators derived from the imported records
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiometricSummary {
    /// Mean body fat over the last 7 days
    pub weekly_body_fat: f64,
    pub muscle_fat_ratio: f64,
    pub bmi_trend: Trend,
    pub records: usize,
}

/// Everything the presentation layer shows for one range selection
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub range: TimeRange,
    pub stats: WeightStats,
    pub series: Vec<ChartPoint>,
    /// Loaded weight records, newest first
    pub table: Vec<WeightRecord>,
    pub biometrics: BiometricSummary,
}

impl Dashboard {
    /// Number of weight records the dashboard was built from
    pub fn record_count(&self) -> usize {
        self.table.len()
    }
}

/// Service that assembles a [`Dashboard`]
pub struct DashboardService<S> {
    weights: WeightRepository<S>,
    biometrics: BiometricRepository<S>,
}

impl<S: KeyValueStore + Clone> DashboardService<S> {
    pub fn new(store: S) -> Self {
        DashboardService {
            weights: WeightRepository::new(store.clone()),
            biometrics: BiometricRepository::new(store),
        }
    }

    /// Load the `limit` most recent weights and all biometric records, then
    /// aggregate them for `range` relative to `today`.
    pub fn build(&self, range: TimeRange, limit: usize, today: NaiveDate) -> Result<Dashboard> {
        let table = self.weights.all_weights(limit)?;
        let biometrics = self.biometrics.load()?;

        Ok(Dashboard {
            range,
            stats: compute_stats(&table, range, today),
            series: chart_series(&table, range, today),
            biometrics: BiometricSummary {
                weekly_body_fat: weekly_body_fat(&biometrics, today),
                muscle_fat_ratio: muscle_fat_ratio(&biometrics),
                bmi_trend: bmi_trend(&biometrics),
                records: biometrics.len(),
            },
            table,
        })
    }
}
