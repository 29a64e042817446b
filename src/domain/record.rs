//! Weight records

use chrono::NaiveDate;

/// Tolerance used when matching a weight value for deletion
pub const WEIGHT_TOLERANCE: f64 = 0.001;

/// A single weight measurement (kg) for one calendar day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightRecord {
    pub date: NaiveDate,
    pub weight: f64,
}

impl WeightRecord {
    pub fn new(date: NaiveDate, weight: f64) -> Self {
        WeightRecord { date, weight }
    }

    /// True when this record is for `date` and its weight is within tolerance
    pub fn matches(&self, date: NaiveDate, weight: f64) -> bool {
        self.date == date && (self.weight - weight).abs() < WEIGHT_TOLERANCE
    }
}
