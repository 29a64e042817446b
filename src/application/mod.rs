//! Application layer - Use cases and orchestration

pub mod dashboard;
pub mod import_biometrics;
pub mod init;
pub mod manage_config;
pub mod record_weight;

pub use dashboard::{BiometricSummary, Dashboard, DashboardService};
pub use import_biometrics::{ImportBiometricsService, ImportMode, ImportSummary};
pub use manage_config::ConfigService;
pub use record_weight::WeightService;
