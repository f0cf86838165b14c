//! User settings for gastos
//!
//! Manages user preferences: number locale for amounts, where the fetched
//! resources live, and the default transaction type for category reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::GastosPaths;
use crate::display::format::{LocaleKind, NumberLocale};
use crate::error::GastosError;
use crate::models::EXPENSE_LABEL;

/// User settings for gastos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Locale used for amount formatting
    #[serde(default)]
    pub locale: LocaleKind,

    /// Directory with the fetched JSON resources; defaults to the data dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,

    /// Transaction type shown by the category report when none is given
    #[serde(default = "default_category_type")]
    pub default_category_type: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_category_type() -> String {
    EXPENSE_LABEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            locale: LocaleKind::default(),
            source_dir: None,
            default_category_type: default_category_type(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &GastosPaths) -> Result<Self, GastosError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| GastosError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                GastosError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GastosPaths) -> Result<(), GastosError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| GastosError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| GastosError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Directory the JSON data source reads from
    pub fn source_dir(&self, paths: &GastosPaths) -> PathBuf {
        self.source_dir.clone().unwrap_or_else(|| paths.data_dir())
    }

    /// Number formatting rules for the configured locale
    pub fn number_locale(&self) -> NumberLocale {
        self.locale.number_locale()
    }
}
