//! Time range selector for aggregation windows

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bounds which records take part in range-filtered aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Records within 7 days of today
    #[default]
    Weekly,
    /// Records within 30 days of today
    Monthly,
    /// Records within 365 days of today
    Yearly,
    /// Every record
    All,
}

impl TimeRange {
    /// Inclusive ceiling on the absolute day distance from today.
    /// `None` means unbounded.
    pub fn max_days(&self) -> Option<i64> {
        match self {
            TimeRange::Weekly => Some(7),
            TimeRange::Monthly => Some(30),
            TimeRange::Yearly => Some(365),
            TimeRange::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Weekly => "weekly",
            TimeRange::Monthly => "monthly",
            TimeRange::Yearly => "yearly",
            TimeRange::All => "all",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(TimeRange::Weekly),
            "monthly" | "month" => Ok(TimeRange::Monthly),
            "yearly" | "year" => Ok(TimeRange::Yearly),
            "all" => Ok(TimeRange::All),
            _ => Err(format!(
                "Invalid range: '{}'. Valid ranges are: weekly, monthly, yearly, all",
                s
            )),
        }
    }
}
