//! Extraction options

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Selection;

/// Options controlling where and what to extract.
///
/// # Example
///
/// ```
/// use vpkcore::extract::{ExtractionOptions, Selection};
///
/// // Everything, under ./out/<archive name>/
/// let options = ExtractionOptions::new("out");
///
/// // Only materials, straight into ./out/
/// let options = ExtractionOptions::new("out")
///     .with_selection(Selection::prefixes(["materials"]))
///     .with_archive_folder(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Destination root directory
    pub destination: PathBuf,

    /// Directories to extract
    #[serde(default)]
    pub selection: Selection,

    /// Nest output under a folder named after the archive (file name without
    /// extension). Default: true
    #[serde(default = "default_true")]
    pub archive_folder: bool,

    /// Leave files that already exist untouched instead of overwriting them.
    /// Default: false
    #[serde(default)]
    pub skip_existing: bool,
}

fn default_true() -> bool {
    true
}

impl ExtractionOptions {
    /// Extract everything under `destination`, overwriting existing files.
    #[must_use]
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            selection: Selection::All,
            archive_folder: true,
            skip_existing: false,
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_archive_folder(mut self, archive_folder: bool) -> Self {
        self.archive_folder = archive_folder;
        self
    }

    #[must_use]
    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    /// Directory that mirrors the archive root for an archive with the given
    /// base name.
    #[must_use]
    pub fn output_root(&self, archive_base_name: &str) -> PathBuf {
        if self.archive_folder {
            self.destination.join(archive_base_name)
        } else {
            self.destination.clone()
        }
    }

    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}
