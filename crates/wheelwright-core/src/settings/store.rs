use std::path::PathBuf;

use super::ScrollSettings;
use crate::config::AppConfig;
use crate::Result;

/// File-backed settings store.
///
/// The store is the single source of truth; viewers cache a snapshot and the
/// panel pushes refreshed snapshots after each write. A missing file reads as
/// the default settings (the file is created implicitly on first write).
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn open(config: &AppConfig) -> Self {
        Self::new(config.settings_path())
    }

    /// Load settings, falling back to defaults when no file exists yet
    pub fn load(&self) -> Result<ScrollSettings> {
        if !self.path.exists() {
            tracing::debug!("no settings file at {:?}, using defaults", self.path);
            return Ok(ScrollSettings::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Persist settings, creating the data directory if needed
    pub fn save(&self, settings: &ScrollSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)?;

        tracing::debug!("saved settings to {:?}", self.path);
        Ok(())
    }
}
