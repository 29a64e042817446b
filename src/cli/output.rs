//! Output formatting utilities

use crate::application::{Dashboard, ImportSummary};
use crate::domain::stats::ChartPoint;
use crate::domain::WeightRecord;

const CHART_WIDTH: usize = 30;

/// Format weight entries as a two-column table
pub fn format_weight_table(records: &[WeightRecord]) -> String {
    if records.is_empty() {
        return "No weights recorded".to_string();
    }

    let mut output = String::from("DATE        WEIGHT\n");
    for record in records {
        output.push_str(&format!(
            "{}  {:>6.2}\n",
            record.date.format("%d/%m/%Y"),
            record.weight
        ));
    }
    output
}

/// Signed weight change, `+` for zero and gains
pub fn format_change(change: f64) -> String {
    // -0.0 would otherwise print as "-0.00"
    let change = if change == 0.0 { 0.0 } else { change };
    format!("{:+.2}", change)
}

/// Horizontal bar chart, one line per point
pub fn format_chart(series: &[ChartPoint]) -> String {
    if series.is_empty() {
        return "No data in range\n".to_string();
    }

    let min = series.iter().map(|p| p.weight).fold(f64::INFINITY, f64::min);
    let max = series
        .iter()
        .map(|p| p.weight)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut output = String::new();
    for point in series {
        let width = if max > min {
            1 + ((point.weight - min) / (max - min) * (CHART_WIDTH - 1) as f64).round() as usize
        } else {
            CHART_WIDTH / 2
        };
        output.push_str(&format!(
            "{}  {:>6.2} kg {}\n",
            point.label,
            point.weight,
            "█".repeat(width)
        ));
    }
    output
}

/// Full stats view
pub fn format_dashboard(dashboard: &Dashboard) -> String {
    let stats = &dashboard.stats;
    let bio = &dashboard.biometrics;

    let mut output = format!("RANGE: {}\n\n", dashboard.range.as_str().to_uppercase());
    output.push_str(&format!(
        "7-day avg:     {:.2} kg {}\n",
        stats.week_avg,
        samples(stats.week_samples)
    ));
    output.push_str(&format!(
        "30-day avg:    {:.2} kg {}\n",
        stats.month_avg,
        samples(stats.month_samples)
    ));
    output.push_str(&format!(
        "Total change:  {} kg {}\n",
        format_change(stats.total_change),
        samples(stats.range_samples)
    ));
    output.push_str(&format!("Records:       {}\n\n", dashboard.record_count()));

    output.push_str(&format_chart(&dashboard.series));
    output.push('\n');

    output.push_str(&format!("Biometric records: {}\n", bio.records));
    output.push_str(&format!("Body fat (7d):  {:.1} %\n", bio.weekly_body_fat));
    output.push_str(&format!("Muscle/fat:     {:.2}\n", bio.muscle_fat_ratio));
    output.push_str(&format!("BMI trend:      {}\n", bio.bmi_trend));
    output
}

/// `(n samples)`, or `(no data)` for an empty window
fn samples(count: usize) -> String {
    if count == 0 {
        "(no data)".to_string()
    } else {
        format!("({} sample{})", count, plural(count))
    }
}

/// Confirmation printed after an import
pub fn format_import_summary(summary: &ImportSummary) -> String {
    let mut output = format!(
        "Imported {} record{}",
        summary.imported,
        plural(summary.imported)
    );
    if summary.rejected > 0 {
        output.push_str(&format!(
            " ({} malformed row{} skipped)",
            summary.rejected,
            plural(summary.rejected)
        ));
    }
    output.push_str(&format!(
        ". {} biometric record{} stored.",
        summary.stored,
        plural(summary.stored)
    ));
    output
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
