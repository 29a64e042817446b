//! CSV parsing for biometric imports
//!
//! The format is deliberately simple: rows are separated by line breaks and
//! fields by commas. There is no quoting, so a field can never contain a
//! comma or a newline.
//!
//! Every field is parsed into a typed value. A row with the wrong number of
//! fields, or with any field that fails to parse, is rejected as a whole and
//! reported in [`CsvImport::rejected`]; it never reaches the record list.

use crate::domain::{BiometricRecord, MetricName, MetricSource};
use crate::error::{Result, WeightlogError};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

/// Column that holds the record date
pub const DATE_COLUMN: &str = "date";

/// Columns a header must contain (case-insensitive, any order)
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "weight", "bodyFat", "muscleMass", "bmi"];

/// Outcome of parsing one CSV document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsvImport {
    /// One record per valid data row, in file order
    pub records: Vec<BiometricRecord>,
    /// Data rows that were dropped
    pub rejected: Vec<RejectedRow>,
}

/// A dropped data row
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line number in the source text
    pub line: usize,
    pub reason: RowError,
}

/// Why a row was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum RowError {
    FieldCount { expected: usize, found: usize },
    InvalidFields(Vec<FieldError>),
}

/// A single field that failed to parse
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    InvalidDate { raw: String },
    InvalidNumber { column: MetricName, raw: String },
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            RowError::InvalidFields(errors) => {
                let parts: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                f.write_str(&parts.join("; "))
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidDate { raw } => write!(f, "invalid date '{}'", raw),
            FieldError::InvalidNumber { column, raw } => {
                write!(f, "invalid number '{}' in column {}", raw, column)
            }
        }
    }
}

/// Role of a header column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Date,
    Metric(MetricName),
    /// Unrecognized extra column; tolerated but not stored
    Ignored,
}

/// Parse CSV text into biometric records.
///
/// Fails with [`WeightlogError::InvalidFormat`] when the header lacks any
/// required column. All readings are stamped with `captured_at` and
/// [`MetricSource::Csv`].
pub fn parse_csv(text: &str, captured_at: DateTime<Utc>) -> Result<CsvImport> {
    let mut lines = text.split('\n').enumerate();

    let header_line = lines.next().map(|(_, l)| l).unwrap_or_default();
    let columns = parse_header(header_line)?;

    let mut import = CsvImport::default();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = index + 1;
        match parse_row(&columns, line, captured_at) {
            Ok(record) => import.records.push(record),
            Err(reason) => import.rejected.push(RejectedRow {
                line: line_number,
                reason,
            }),
        }
    }

    Ok(import)
}

fn parse_header(line: &str) -> Result<Vec<Column>> {
    let headers: Vec<String> = line
        .trim_start_matches('\u{feff}')
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.contains(&col.to_lowercase()))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(WeightlogError::InvalidFormat { missing });
    }

    // A repeated column keeps its first occurrence
    Ok(headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if headers[..i].contains(h) {
                Column::Ignored
            } else if h == DATE_COLUMN {
                Column::Date
            } else {
                MetricName::from_str(h)
                    .map(Column::Metric)
                    .unwrap_or(Column::Ignored)
            }
        })
        .collect())
}

fn parse_row(
    columns: &[Column],
    line: &str,
    captured_at: DateTime<Utc>,
) -> std::result::Result<BiometricRecord, RowError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != columns.len() {
        return Err(RowError::FieldCount {
            expected: columns.len(),
            found: fields.len(),
        });
    }

    let mut date = None;
    let mut metrics = Vec::new();
    let mut errors = Vec::new();

    for (column, raw) in columns.iter().zip(fields) {
        match column {
            Column::Date => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(d) => date = Some(d),
                Err(_) => errors.push(FieldError::InvalidDate {
                    raw: raw.to_string(),
                }),
            },
            Column::Ignored => {}
            Column::Metric(name) => match parse_number(raw) {
                Some(value) => metrics.push((*name, value)),
                None => errors.push(FieldError::InvalidNumber {
                    column: *name,
                    raw: raw.to_string(),
                }),
            },
        }
    }

    match date {
        Some(date) if errors.is_empty() => {
            let mut record = BiometricRecord::new(date);
            for (name, value) in metrics {
                record.set_metric(name, value, captured_at, MetricSource::Csv);
            }
            Ok(record)
        }
        _ => Err(RowError::InvalidFields(errors)),
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
