//! Date reference parsing and resolution

use crate::error::{Result, WeightlogError};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A reference to a calendar day, resolved against a base date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateReference {
    /// Current day
    Today,
    /// Previous day
    Yesterday,
    /// Current/most recent occurrence of a weekday
    Weekday(Weekday),
    /// Previous occurrence of a weekday (strictly before today)
    LastWeekday(Weekday),
    /// Specific date
    SpecificDate(NaiveDate),
}

impl DateReference {
    /// Parse a date reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => Ok(DateReference::Today),
            "yesterday" => Ok(DateReference::Yesterday),
            _ if normalized.starts_with("last ") => parse_weekday(&normalized[5..])
                .map(DateReference::LastWeekday)
                .ok_or_else(|| WeightlogError::InvalidDate(input.to_string())),
            _ => {
                if let Some(day) = parse_weekday(&normalized) {
                    return Ok(DateReference::Weekday(day));
                }
                NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                    .map(DateReference::SpecificDate)
                    .map_err(|_| WeightlogError::InvalidDate(input.to_string()))
            }
        }
    }

    /// Resolve this reference to an actual date
    pub fn resolve(&self, base_date: NaiveDate) -> NaiveDate {
        match self {
            DateReference::Today => base_date,
            DateReference::Yesterday => base_date - Duration::days(1),
            DateReference::Weekday(target) => {
                base_date - Duration::days(days_back(base_date.weekday(), *target))
            }
            DateReference::LastWeekday(target) => {
                let days = match days_back(base_date.weekday(), *target) {
                    0 => 7,
                    n => n,
                };
                base_date - Duration::days(days)
            }
            DateReference::SpecificDate(date) => *date,
        }
    }
}

/// Parse and resolve in one step
pub fn resolve_date(input: &str, base_date: NaiveDate) -> Result<NaiveDate> {
    DateReference::parse(input).map(|r| r.resolve(base_date))
}

fn parse_weekday(day: &str) -> Option<Weekday> {
    match day {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Days from the most recent `target` up to `current` (0 when equal)
fn days_back(current: Weekday, target: Weekday) -> i64 {
    ((current.num_days_from_monday() + 7 - target.num_days_from_monday()) % 7) as i64
}
