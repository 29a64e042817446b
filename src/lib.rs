//! weightlog - Personal weight and biometric tracker
//!
//! Records manual weight entries and CSV-imported biometric data in a local
//! store, and derives range-filtered statistics from them.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::WeightlogError;
