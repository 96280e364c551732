//! Mapping tree nodes back to archive entries

use crate::archive::{Archive, ArchiveDirectory, ArchiveEntry};
use crate::error::{Error, Result};
use crate::tree::segment::{self, SEPARATOR};
use crate::tree::{DisplayTree, NodeId};

/// An archive entry together with the directory record that holds it.
#[derive(Debug)]
pub struct ResolvedEntry<'a, E> {
    pub directory: &'a ArchiveDirectory<E>,
    pub entry: &'a E,
}

impl<E: ArchiveEntry> ResolvedEntry<'_, E> {
    /// Archive path of the entry (`dir/name`).
    #[must_use]
    pub fn path(&self) -> String {
        self.directory.entry_path(self.entry.full_name())
    }

    /// Read the entry's bytes.
    pub fn read(&self) -> Result<Vec<u8>> {
        self.entry.read_bytes().map_err(|source| Error::EntryIo {
            entry: self.path(),
            source,
        })
    }
}

/// Resolve a leaf of `tree` to the entry that produced it.
///
/// The leaf's folder path is rebuilt through parent links (the root label is
/// not part of it) and matched exactly against directory paths. When several
/// sibling leaves share a label, the n-th of them maps to the n-th matching
/// entry in archive order.
pub fn resolve_node<'a, A: Archive>(
    archive: &'a A,
    tree: &DisplayTree,
    id: NodeId,
) -> Result<ResolvedEntry<'a, A::Entry>> {
    let node = tree.node(id)?;
    if !tree.is_leaf(id) {
        return Err(Error::NotFound(tree.path_of(id)?));
    }

    let dir_path = tree.directory_path_of(id)?;
    let name = node.label();
    let ordinal = node.parent().map_or(0, |parent| {
        tree.get(parent).map_or(0, |p| {
            p.children()
                .iter()
                .take_while(|&&sibling| sibling != id)
                .filter(|&&sibling| {
                    tree.is_leaf(sibling) && tree.get(sibling).is_some_and(|s| s.label() == name)
                })
                .count()
        })
    });

    find_entry(archive.directories(), &dir_path, name, ordinal).ok_or_else(|| {
        tracing::debug!("No entry for tree node {dir_path}/{name}");
        Error::NotFound(tree.path_of(id).unwrap_or_else(|_| name.to_string()))
    })
}

/// Resolve an archive path (`sound/ambient/wind.wav`, or `a.txt` at the root).
pub fn resolve_path<'a, A: Archive>(
    archive: &'a A,
    path: &str,
) -> Result<ResolvedEntry<'a, A::Entry>> {
    let (dir_path, name) = match path.rfind(SEPARATOR) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    };

    find_entry(archive.directories(), dir_path, name, 0)
        .ok_or_else(|| Error::NotFound(path.to_string()))
}

/// Resolve an archive path and read its bytes.
pub fn read_path<A: Archive>(archive: &A, path: &str) -> Result<Vec<u8>> {
    resolve_path(archive, path)?.read()
}

fn find_entry<'a, E: ArchiveEntry>(
    directories: &'a [ArchiveDirectory<E>],
    dir_path: &str,
    name: &str,
    ordinal: usize,
) -> Option<ResolvedEntry<'a, E>> {
    directories
        .iter()
        .filter(|d| segment::trim_trailing(&d.path) == dir_path)
        .flat_map(|directory| {
            directory
                .entries
                .iter()
                .filter(|e| e.full_name() == name)
                .map(move |entry| ResolvedEntry { directory, entry })
        })
        .nth(ordinal)
}
