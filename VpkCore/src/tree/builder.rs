//! Directory tree construction
//!
//! Turns the archive's flat `(path, entries)` records into a [`DisplayTree`].
//! Folder nodes are looked up by label among the current node's children, so
//! records that share a prefix land on the same intermediate nodes whatever
//! order they arrive in.

use crate::archive::{ArchiveDirectory, ArchiveEntry};
use crate::error::Result;

use super::node::{DisplayTree, NodeKind};
use super::segment;

/// Build the display tree for an archive.
///
/// Entries of the root directory (`""`) hang directly under the root node.
/// Folder segments only merge with folder nodes, so a file and a folder with
/// the same name in the same parent are both kept, as are two files with the
/// same name. A directory record without entries still yields its folders.
///
/// The whole build fails with [`Error::Structural`] if any directory path is
/// malformed; no partial tree is returned.
///
/// [`Error::Structural`]: crate::Error::Structural
pub fn build_tree<E: ArchiveEntry>(
    display_name: &str,
    directories: &[ArchiveDirectory<E>],
) -> Result<DisplayTree> {
    let mut tree = DisplayTree::new(display_name);

    for directory in directories {
        let mut current = tree.root();
        for part in segment::segment(&directory.path)? {
            current = match tree.find_child_of_kind(current, part, NodeKind::Directory) {
                Some(existing) => existing,
                None => {
                    if tree.find_child_of_kind(current, part, NodeKind::File).is_some() {
                        tracing::warn!(
                            "Folder {} in {:?} shares its name with a file, keeping both",
                            part,
                            directory.path
                        );
                    }
                    tree.push_child(current, part, NodeKind::Directory)
                }
            };
        }

        for entry in &directory.entries {
            let name = entry.full_name();
            if tree.find_child_of_kind(current, name, NodeKind::File).is_some() {
                tracing::warn!("Duplicate file {} in {:?}, keeping both", name, directory.path);
            }
            tree.push_child(current, name, NodeKind::File);
        }
    }

    tracing::debug!(
        "Built tree for {}: {} directories, {} files",
        display_name,
        tree.directory_count(),
        tree.leaf_count()
    );

    Ok(tree)
}
