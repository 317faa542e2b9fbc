//! Application settings loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or a file that only overrides a
//! few values is fine. A file that exists but cannot be parsed is an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default key the savings collection is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "celenganku_data";

/// Image shown for records without an uploaded picture.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x200?text=No+Image";

/// Top-level structure of `config.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// How amounts, images, and progress are displayed
    pub display: DisplaySettings,
    /// Where the collection is persisted
    pub storage: StorageSettings,
}

/// `[display]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Currency symbol placed before every amount
    pub currency_symbol: String,
    /// Separator inserted between groups of three digits
    pub thousands_separator: String,
    /// URL used when a record has no image
    pub placeholder_image: String,
    /// Number of cells in rendered progress bars
    pub progress_bar_length: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "Rp".to_string(),
            thousands_separator: ".".to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            progress_bar_length: 10,
        }
    }
}

/// `[storage]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSettings {
    /// Key in the `system_state` table holding the collection
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file, returning defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!("No config file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_settings(&contents)
}

/// Loads settings from the path in `CELENGAN_CONFIG`, or `./config.toml`.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("CELENGAN_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_settings(path)
}
