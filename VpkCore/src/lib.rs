//! # VpkCore
//!
//! The archive model behind a VPK (Valve Pak) browser: everything between the
//! records a VPK reader produces and what a user sees and extracts.
//!
//! - **Archive model** - [`archive::Archive`] and [`archive::ArchiveEntry`]
//!   are implemented by an external reader; [`archive::MemoryArchive`] is an
//!   in-memory implementation
//! - **Display tree** - build a folder/file tree from the flat directory list
//!   and order it folders-first, then by name
//! - **Resolution** - map a tree leaf (or an archive path) back to its entry
//! - **Extraction** - write a selection of directories to disk with progress
//!
//! ## Quick Start
//!
//! ```no_run
//! use vpkcore::prelude::*;
//!
//! let archive = MemoryArchive::new("pak01_dir.vpk")
//!     .with_directory("", [("a.txt", b"hello".to_vec())])
//!     .with_directory("sound/ambient", [("wind.wav", vec![0u8; 16])]);
//!
//! // Tree for display
//! let tree = build_display_tree(&archive)?;
//! print!("{}", tree.render());
//!
//! // Read a file through its tree node
//! let leaf = tree.find("a.txt").expect("leaf exists");
//! let data = resolve_node(&archive, &tree, leaf)?.read()?;
//!
//! // Extract everything below ./out/pak01_dir/
//! let report = extract(&archive, &ExtractionOptions::new("out"));
//! println!("{} files written", report.files_written);
//! # Ok::<(), vpkcore::Error>(())
//! ```

pub mod archive;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod tree;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::archive::{
        Archive, ArchiveDirectory, ArchiveEntry, ArchiveHeader, MemoryArchive, MemoryEntry,
    };
    pub use crate::error::{Error, Result};
    pub use crate::extract::{
        ExtractionOptions, ExtractionPhase, ExtractionProgress, ExtractionReport, Selection,
        extract, extract_with_progress,
    };
    pub use crate::resolve::{ResolvedEntry, read_path, resolve_node, resolve_path};
    pub use crate::tree::{
        DisplayTree, NodeId, NodeKind, TreeNode, build_display_tree, build_tree, sort_tree,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
