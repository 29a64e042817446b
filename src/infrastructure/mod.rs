//! Infrastructure layer - Persistence, configuration and logging

pub mod biometrics;
pub mod config;
pub mod logging;
pub mod repository;
pub mod store;
pub mod weights;

pub use biometrics::BiometricRepository;
pub use config::Config;
pub use repository::{FileSystemRepository, LogRepository};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreDocument};
pub use weights::WeightRepository;
