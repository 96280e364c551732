//! Progress and result types for extraction

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Phase of an extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPhase {
    /// Writing the entries of selected directories
    WritingFiles,
    /// Nothing running; progress is back at zero
    Idle,
}

impl ExtractionPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WritingFiles => "Writing files",
            Self::Idle => "Idle",
        }
    }
}

/// Progress information emitted after each directory
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionProgress {
    /// Current operation phase
    pub phase: ExtractionPhase,
    /// Directories finished so far
    pub current: usize,
    /// Directories selected
    pub total: usize,
    /// Path of the directory just finished (if applicable)
    pub current_directory: Option<String>,
}

impl ExtractionProgress {
    /// A directory has been finished.
    #[must_use]
    pub fn directory_done(current: usize, total: usize, directory: impl Into<String>) -> Self {
        Self {
            phase: ExtractionPhase::WritingFiles,
            current,
            total,
            current_directory: Some(directory.into()),
        }
    }

    /// The run is over and observers should show an idle state.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            phase: ExtractionPhase::Idle,
            current: 0,
            total: 0,
            current_directory: None,
        }
    }

    /// Fraction of selected directories processed (0.0 - 1.0). Always 0.0
    /// once idle.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.phase == ExtractionPhase::Idle || self.total == 0 {
            0.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Progress callback for extraction.
///
/// Must be `Sync + Send` so a worker thread can drive it.
pub type ProgressCallback<'a> = &'a (dyn Fn(&ExtractionProgress) + Sync + Send);

/// One thing that went wrong during a batch extraction.
#[derive(Debug)]
pub struct ExtractionFailure {
    /// Archive directory being processed
    pub directory: String,
    /// Entry name, `None` when the whole directory was skipped
    pub entry: Option<String>,
    /// The cause
    pub error: Error,
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(entry) => write!(f, "{}/{}: {}", self.directory, entry, self.error),
            None => write!(f, "{}/: {}", self.directory, self.error),
        }
    }
}

/// Outcome of a batch extraction.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Folder that mirrors the archive root
    pub output_root: PathBuf,
    /// Directories matched by the selection
    pub directories_selected: usize,
    /// Directories visited (all of the selected ones once the run ends)
    pub directories_processed: usize,
    /// Entries written to disk
    pub files_written: usize,
    /// Entries left alone because the file already existed
    pub files_skipped: usize,
    /// Per-entry and per-directory failures
    pub failures: Vec<ExtractionFailure>,
}

impl ExtractionReport {
    /// Returns true if nothing failed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Entries written, skipped, or failed
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.files_written + self.files_skipped + self.failures.iter().filter(|f| f.entry.is_some()).count()
    }

    /// Turn a report with failures into [`Error::PartialExtraction`].
    pub fn into_result(self) -> Result<Self> {
        match self.failures.first() {
            None => Ok(self),
            Some(first) => Err(Error::PartialExtraction {
                failed: self.failures.len(),
                total: self.total_files(),
                first_error: first.to_string(),
            }),
        }
    }
}
