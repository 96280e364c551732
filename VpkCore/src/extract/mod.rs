//! Extraction of archive directories to disk
//!
//! A [`Selection`] picks directories by raw path prefix (or all of them), and
//! [`extract_with_progress`] mirrors each picked directory's entries below the
//! destination, reporting progress per directory and collecting failures
//! instead of aborting.

mod engine;
mod options;
mod selection;
mod types;

pub use engine::{extract, extract_with_progress};
pub use options::ExtractionOptions;
pub use selection::Selection;
pub use types::{
    ExtractionFailure, ExtractionPhase, ExtractionProgress, ExtractionReport, ProgressCallback,
};
