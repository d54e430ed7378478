//! Application settings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};
use crate::export::DelimitedOptions;
use crate::messages::Messages;
use crate::report::DEFAULT_SITE_URL;

/// Delimited export defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub delimiter: char,
    pub include_header: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }
}

impl ExportSettings {
    pub fn options(&self) -> Result<DelimitedOptions> {
        DelimitedOptions::new(self.delimiter, self.include_header)
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Protocol and host shown in the report description
    pub site_url: Option<String>,
    /// Default directory snapshot to report on
    pub snapshot_path: Option<String>,
    /// Default export directory
    pub export_directory: Option<String>,
    #[serde(default)]
    pub export: ExportSettings,
    /// Translations keyed by message id
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl Settings {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "fraziersystems", "user-security-report")
            .ok_or_else(|| ReportError::Config("Could not determine config directory".into()))?;

        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn site_url(&self) -> &str {
        self.site_url.as_deref().unwrap_or(DEFAULT_SITE_URL)
    }

    pub fn messages(&self) -> Messages {
        Messages::new(self.messages.clone())
    }
}
