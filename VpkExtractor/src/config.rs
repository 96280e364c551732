//! Persisted settings for VpkExtractor

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vpkcore::extract::{ExtractionOptions, Selection};

use crate::error::{Error, Result};

/// Maximum number of recent archives to track
const MAX_RECENT_ARCHIVES: usize = 10;

// Default value functions for serde
fn default_destination_root() -> String {
    ".".to_string()
}
fn default_true() -> bool {
    true
}

/// User settings, stored as JSON in the platform config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Where extracted archives go. `~` is expanded.
    #[serde(default = "default_destination_root")]
    pub destination_root: String,
    /// Folder last browsed for archives
    #[serde(default)]
    pub last_open_dir: Option<String>,
    /// Recently opened archives, most recent first
    #[serde(default)]
    pub recent_archives: Vec<String>,
    /// Nest extracted files under a folder named after the archive
    #[serde(default = "default_true")]
    pub archive_folder: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            destination_root: default_destination_root(),
            last_open_dir: None,
            recent_archives: Vec::new(),
            archive_folder: true,
        }
    }
}

impl ExtractorConfig {
    /// `<config dir>/VpkExtractor/config.json`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("VpkExtractor").join("config.json"))
    }

    /// Load the saved config, falling back to defaults if it is missing or
    /// unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| match Self::load_from(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::debug!("Using default config ({}): {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(Error::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Move `archive` to the front of the recent list.
    pub fn add_recent_archive(&mut self, archive: &str) {
        self.recent_archives.retain(|a| a != archive);
        self.recent_archives.insert(0, archive.to_string());
        self.recent_archives.truncate(MAX_RECENT_ARCHIVES);
    }

    /// Destination root with `~` expanded.
    pub fn destination(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.destination_root).as_ref())
    }

    /// Extraction options for `selection` under the configured destination.
    pub fn extraction_options(&self, selection: Selection) -> ExtractionOptions {
        ExtractionOptions::new(self.destination())
            .with_selection(selection)
            .with_archive_folder(self.archive_folder)
    }
}
