//! Range filtering and derived statistics
//!
//! Every function here is pure: the caller passes the record snapshot and
//! the reference day. Empty windows report zero, and each statistic that
//! can be empty carries a sample count next to it so callers can tell
//! "no data" apart from a genuine zero.

use crate::domain::{BiometricRecord, MetricName, TimeRange, WeightRecord};
use chrono::{Duration, NaiveDate};
use std::fmt;

/// Trailing window for the short weight average and body-fat stat
pub const WEEK_DAYS: i64 = 7;
/// Trailing window for the long weight average
pub const MONTH_DAYS: i64 = 30;
/// Number of most recent records considered by [`bmi_trend`]
pub const BMI_TREND_WINDOW: usize = 7;
/// BMI deltas below this are reported as flat
pub const BMI_TREND_THRESHOLD: f64 = 0.1;

/// Weight statistics for one range selection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightStats {
    /// Mean weight over the last 7 days, 2 decimals
    pub week_avg: f64,
    /// Mean weight over the last 30 days, 2 decimals
    pub month_avg: f64,
    /// Last minus first weight in the selected range, 2 decimals
    pub total_change: f64,
    pub week_samples: usize,
    pub month_samples: usize,
    pub range_samples: usize,
}

/// Direction of change between two readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat => "→",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arrow())
    }
}

/// One point of the weight chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Short `dd/mm` label
    pub label: String,
    pub weight: f64,
}

/// Round half away from zero to `digits` decimals
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Records within `max_days` of `today`, sorted ascending by date.
///
/// Past dates share the trailing window used for averages, so a record
/// exactly `max_days` old falls outside. Future dates are kept up to
/// `max_days` ahead.
pub fn filter_by_range(
    records: &[WeightRecord],
    range: TimeRange,
    today: NaiveDate,
) -> Vec<WeightRecord> {
    let mut filtered: Vec<WeightRecord> = records
        .iter()
        .filter(|r| match range.max_days() {
            Some(max) => within_range(r.date, today, max),
            None => true,
        })
        .copied()
        .collect();
    filtered.sort_by_key(|r| r.date);
    filtered
}

/// Trailing averages and the net change across the selected range
pub fn compute_stats(records: &[WeightRecord], range: TimeRange, today: NaiveDate) -> WeightStats {
    let (week_avg, week_samples) = mean(
        records
            .iter()
            .filter(|r| in_trailing_window(r.date, today, WEEK_DAYS))
            .map(|r| r.weight),
    );
    let (month_avg, month_samples) = mean(
        records
            .iter()
            .filter(|r| in_trailing_window(r.date, today, MONTH_DAYS))
            .map(|r| r.weight),
    );

    let in_range = filter_by_range(records, range, today);
    let total_change = match (in_range.first(), in_range.last()) {
        (Some(first), Some(last)) => last.weight - first.weight,
        _ => 0.0,
    };

    WeightStats {
        week_avg: round_to(week_avg, 2),
        month_avg: round_to(month_avg, 2),
        total_change: round_to(total_change, 2),
        week_samples,
        month_samples,
        range_samples: in_range.len(),
    }
}

/// Chart points for the selected range, oldest first
pub fn chart_series(records: &[WeightRecord], range: TimeRange, today: NaiveDate) -> Vec<ChartPoint> {
    filter_by_range(records, range, today)
        .into_iter()
        .map(|r| ChartPoint {
            date: r.date,
            label: r.date.format("%d/%m").to_string(),
            weight: r.weight,
        })
        .collect()
}

/// Mean body fat over the last 7 days, 1 decimal; zero when no record
/// in the window carries a body-fat reading
pub fn weekly_body_fat(biometrics: &[BiometricRecord], today: NaiveDate) -> f64 {
    let (avg, _) = mean(
        biometrics
            .iter()
            .filter(|b| in_trailing_window(b.date, today, WEEK_DAYS))
            .filter_map(|b| b.metric(MetricName::BodyFat)),
    );
    round_to(avg, 1)
}

/// Muscle mass over body fat for the most recent record, 2 decimals
pub fn muscle_fat_ratio(biometrics: &[BiometricRecord]) -> f64 {
    let Some(latest) = biometrics.iter().max_by_key(|b| b.date) else {
        return 0.0;
    };
    let muscle = latest.metric(MetricName::MuscleMass).unwrap_or(0.0);
    match latest.metric(MetricName::BodyFat) {
        Some(fat) if fat != 0.0 => round_to(muscle / fat, 2),
        _ => 0.0,
    }
}

/// BMI direction between the first and last of the 7 most recent records
pub fn bmi_trend(biometrics: &[BiometricRecord]) -> Trend {
    let mut ordered: Vec<&BiometricRecord> = biometrics.iter().collect();
    ordered.sort_by_key(|b| b.date);

    let recent = &ordered[ordered.len().saturating_sub(BMI_TREND_WINDOW)..];
    if recent.len() < 2 {
        return Trend::Flat;
    }

    let first = recent[0].metric(MetricName::Bmi);
    let last = recent[recent.len() - 1].metric(MetricName::Bmi);
    let (Some(first), Some(last)) = (first, last) else {
        return Trend::Flat;
    };

    let diff = last - first;
    if diff.abs() < BMI_TREND_THRESHOLD {
        Trend::Flat
    } else if diff > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}

fn within_range(date: NaiveDate, today: NaiveDate, max_days: i64) -> bool {
    let ahead = (date - today).num_days();
    if ahead > 0 {
        ahead <= max_days
    } else {
        in_trailing_window(date, today, max_days)
    }
}

/// The `days` most recent calendar days including today, plus any future date
fn in_trailing_window(date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    date > today - Duration::days(days)
}

fn mean(values: impl Iterator<Item = f64>) -> (f64, usize) {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        (0.0, 0)
    } else {
        (sum / count as f64, count)
    }
}
