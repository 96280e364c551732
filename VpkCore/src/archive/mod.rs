//! Archive collaborator model
//!
//! The binary reader that parses a VPK header and directory tree lives outside
//! this crate. It hands over its results through the traits here: an ordered
//! list of [`ArchiveDirectory`] records, each holding the entries stored
//! directly in that folder, plus read-only [`ArchiveHeader`] metadata.
//!
//! [`MemoryArchive`] implements the traits over owned byte buffers so the
//! tree and extraction code can be driven without a file on disk.

mod memory;

pub use memory::{MemoryArchive, MemoryEntry};

use std::fmt;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tree::segment;

/// One stored file inside an archive.
pub trait ArchiveEntry {
    /// File name including extension (`wind.wav`).
    fn full_name(&self) -> &str;

    /// Stored length in bytes.
    fn len(&self) -> u64;

    /// Whether the entry stores zero bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the raw stored bytes.
    fn read_bytes(&self) -> io::Result<Vec<u8>>;

    /// Write the stored bytes to `dest`, replacing any existing file.
    fn write_to(&self, dest: &Path) -> io::Result<()> {
        let data = self.read_bytes()?;
        std::fs::write(dest, data)
    }
}

/// A flat archive record: one `/`-separated folder path and the entries
/// stored directly inside it. The empty path is the archive root.
#[derive(Debug, Clone)]
pub struct ArchiveDirectory<E> {
    /// Folder path, `""` for the root
    pub path: String,
    /// Entries in archive order
    pub entries: Vec<E>,
}

impl<E: ArchiveEntry> ArchiveDirectory<E> {
    #[must_use]
    pub fn new(path: impl Into<String>, entries: Vec<E>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    /// Find an entry by its full name.
    pub fn entry(&self, full_name: &str) -> Option<&E> {
        self.entries.iter().find(|e| e.full_name() == full_name)
    }

    /// Archive path of one of this directory's entries (`dir/name`, or just
    /// `name` at the root).
    #[must_use]
    pub fn entry_path(&self, full_name: &str) -> String {
        let path = segment::trim_trailing(&self.path);
        if path.is_empty() {
            full_name.to_string()
        } else {
            format!("{path}/{full_name}")
        }
    }
}

/// Header fields surfaced for display. Nothing in this crate interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveHeader {
    /// Length of the header in bytes
    pub header_length: u32,
    /// Length of the directory tree in bytes
    pub tree_length: u32,
    /// Signature word (`0x55aa1234` for VPK)
    pub signature: u32,
    /// Format version
    pub version: u32,
    /// Whether data lives in numbered `_NNN.vpk` part files
    pub multi_part: bool,
}

impl fmt::Display for ArchiveHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Header Length: {}", self.header_length)?;
        writeln!(f, "Tree Length: {}", self.tree_length)?;
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "MultiPart? {}", self.multi_part)
    }
}

/// A parsed archive as seen by the tree and extraction code.
pub trait Archive {
    type Entry: ArchiveEntry;

    /// File name of the archive (`pak01_dir.vpk`), used as the tree root label.
    fn file_name(&self) -> &str;

    /// Header metadata.
    fn header(&self) -> ArchiveHeader;

    /// Directory records in archive order.
    fn directories(&self) -> &[ArchiveDirectory<Self::Entry>];

    /// File name without its final extension (`pak01_dir`). Names without an
    /// extension are returned unchanged.
    fn base_name(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }

    /// Total number of entries across all directories.
    fn entry_count(&self) -> usize {
        self.directories().iter().map(|d| d.entries.len()).sum()
    }
}
