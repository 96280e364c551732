//! Archive directory tree
//!
//! Builds the navigable folder/file tree from an archive's flat directory
//! records and orders it for display.

mod builder;
mod node;
pub mod segment;
mod sort;

pub use builder::build_tree;
pub use node::{DisplayTree, NodeId, NodeKind, TreeNode};
pub use sort::sort_tree;

use crate::archive::Archive;
use crate::error::Result;

/// Build and sort the tree for `archive`, rooted at its file name.
pub fn build_display_tree<A: Archive>(archive: &A) -> Result<DisplayTree> {
    let mut tree = build_tree(archive.file_name(), archive.directories())?;
    sort_tree(&mut tree);
    Ok(tree)
}
