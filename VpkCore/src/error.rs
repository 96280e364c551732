//! Error types for `VpkCore`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `VpkCore` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing a single archive entry failed.
    #[error("IO error on entry {entry}: {source}")]
    EntryIo {
        /// Archive path of the entry (`dir/name`).
        entry: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    // ==================== Tree Errors ====================
    /// A directory path could not be turned into tree nodes.
    #[error("malformed directory path {path:?}: {reason}")]
    Structural {
        /// The offending archive directory path.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A tree node or path does not map back to any archive entry.
    #[error("no archive entry for {0}")]
    NotFound(String),

    /// A node id that does not belong to the tree it was used with.
    #[error("invalid node id: {0}")]
    InvalidNode(usize),

    // ==================== Extraction Errors ====================
    /// The destination folder for a directory could not be created or used.
    #[error("destination unavailable: {}: {source}", path.display())]
    DestinationUnavailable {
        /// The destination folder or file.
        path: PathBuf,
        /// Why it could not be used.
        #[source]
        source: std::io::Error,
    },

    /// Extraction finished but some entries or directories failed.
    #[error("extraction failed for {failed} of {total} files: {first_error}")]
    PartialExtraction {
        /// Number of failures.
        failed: usize,
        /// Number of entries attempted.
        total: usize,
        /// The first failure encountered.
        first_error: String,
    },
}

/// A specialized Result type for `VpkCore` operations.
pub type Result<T> = std::result::Result<T, Error>;
