//! In-memory archive

use std::io;
use std::sync::Arc;

use super::{Archive, ArchiveDirectory, ArchiveEntry, ArchiveHeader};

/// An entry whose bytes are held in memory.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    name: String,
    data: Arc<[u8]>,
}

impl MemoryEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// The stored bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl ArchiveEntry for MemoryEntry {
    fn full_name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.data.to_vec())
    }
}

/// An archive assembled from in-memory directories.
///
/// # Example
///
/// ```
/// use vpkcore::archive::{Archive, MemoryArchive};
///
/// let archive = MemoryArchive::new("pak01_dir.vpk")
///     .with_directory("", [("a.txt", b"hello".to_vec())])
///     .with_directory("sound/ambient", [("wind.wav", vec![0u8; 4])]);
///
/// assert_eq!(archive.directories().len(), 2);
/// assert_eq!(archive.entry_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryArchive {
    file_name: String,
    header: ArchiveHeader,
    directories: Vec<ArchiveDirectory<MemoryEntry>>,
}

impl MemoryArchive {
    /// Create an empty archive with a default header.
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            header: ArchiveHeader::default(),
            directories: Vec::new(),
        }
    }

    /// Set the header metadata.
    #[must_use]
    pub fn with_header(mut self, header: ArchiveHeader) -> Self {
        self.header = header;
        self
    }

    /// Append a directory record built from `(name, bytes)` pairs.
    #[must_use]
    pub fn with_directory<I, N, D>(mut self, path: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Arc<[u8]>>,
    {
        self.push_directory(ArchiveDirectory::new(
            path,
            entries
                .into_iter()
                .map(|(name, data)| MemoryEntry::new(name, data))
                .collect(),
        ));
        self
    }

    /// Append an already-built directory record.
    pub fn push_directory(&mut self, directory: ArchiveDirectory<MemoryEntry>) {
        self.directories.push(directory);
    }
}

impl Archive for MemoryArchive {
    type Entry = MemoryEntry;

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn header(&self) -> ArchiveHeader {
        self.header.clone()
    }

    fn directories(&self) -> &[ArchiveDirectory<MemoryEntry>] {
        &self.directories
    }
}
