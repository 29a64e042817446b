//! Domain layer - Records, import parsing and aggregation

pub mod biometric;
pub mod import;
pub mod range;
pub mod record;
pub mod stats;
pub mod time_ref;

pub use biometric::{BiometricRecord, MetricName, MetricReading, MetricSource};
pub use import::{parse_csv, CsvImport, FieldError, RejectedRow, RowError};
pub use range::TimeRange;
pub use record::WeightRecord;
pub use time_ref::{resolve_date, DateReference};
