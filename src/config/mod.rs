/// Database configuration and connection management
pub mod database;

/// Display and storage settings from config.toml
pub mod settings;

pub use settings::{DisplaySettings, Settings, StorageSettings};
