//! Pipeline settings.
//!
//! Stored as JSON at `<config dir>/answerviz/settings.json`. Every field has a
//! default, so partial files are valid and a missing file means defaults.

use crate::constants::{
    DEFAULT_CALLBACK_KEYS, DEFAULT_CALLBACK_PREFIXES, DEFAULT_EXPORT_FILENAME, SETTINGS_DIR_NAME,
    SETTINGS_FILE_NAME,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reading or writing the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Filename used for every default export format
    pub export_filename: String,
    /// Keys whose values must be callables
    pub callback_keys: Vec<String>,
    /// Key prefixes that mark event handlers
    pub callback_prefixes: Vec<String>,
    /// Disable mouse-wheel zoom on the rendered chart
    pub disable_zoom: bool,
    pub enable_animations: bool,
    /// Hide data labels on unstacked bar charts
    pub hide_bar_data_labels: bool,
    /// Center chart title and subtitle
    pub center_titles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            callback_keys: DEFAULT_CALLBACK_KEYS.iter().map(|k| k.to_string()).collect(),
            callback_prefixes: DEFAULT_CALLBACK_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            disable_zoom: true,
            enable_animations: true,
            hide_bar_data_labels: true,
            center_titles: true,
        }
    }
}

/// Default location of the settings file
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}

impl Settings {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = default_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Whether `key` names a callback in chart options
    pub fn is_callback_key(&self, key: &str) -> bool {
        self.callback_keys.iter().any(|k| k == key)
            || self
                .callback_prefixes
                .iter()
                .any(|prefix| key.starts_with(prefix.as_str()))
    }
}
