//! Biometric records and metric names

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Recognized biometric metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricName {
    Weight,
    BodyFat,
    MuscleMass,
    Bmi,
}

impl MetricName {
    pub const ALL: [MetricName; 4] = [
        MetricName::Weight,
        MetricName::BodyFat,
        MetricName::MuscleMass,
        MetricName::Bmi,
    ];

    /// Column name as written in CSV headers and stored JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Weight => "weight",
            MetricName::BodyFat => "bodyFat",
            MetricName::MuscleMass => "muscleMass",
            MetricName::Bmi => "bmi",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = String;

    /// Case-insensitive; `bodyfat`, `BodyFat` and `BODYFAT` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        MetricName::ALL
            .into_iter()
            .find(|m| m.as_str().to_lowercase() == normalized)
            .ok_or_else(|| format!("Unknown metric: '{}'", s))
    }
}

/// Where a reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricSource {
    #[default]
    Manual,
    Csv,
    External,
}

/// One captured metric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub value: f64,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub captured_at: DateTime<Utc>,
    pub source: MetricSource,
}

/// All biometric readings for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricRecord {
    pub date: NaiveDate,
    pub metrics: BTreeMap<MetricName, MetricReading>,
}

impl BiometricRecord {
    pub fn new(date: NaiveDate) -> Self {
        BiometricRecord {
            date,
            metrics: BTreeMap::new(),
        }
    }

    pub fn set_metric(
        &mut self,
        name: MetricName,
        value: f64,
        captured_at: DateTime<Utc>,
        source: MetricSource,
    ) {
        self.metrics.insert(
            name,
            MetricReading {
                value,
                captured_at,
                source,
            },
        );
    }

    pub fn metric(&self, name: MetricName) -> Option<f64> {
        self.metrics.get(&name).map(|r| r.value)
    }
}
