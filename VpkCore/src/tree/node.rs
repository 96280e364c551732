//! Display tree storage
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. Each node
//! owns the ordered list of its children's ids; the parent id is a plain back
//! link used to rebuild paths and never for ownership.

use crate::error::{Error, Result};

use super::segment::{self, SEPARATOR};

/// Index of a node inside a [`DisplayTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a node stands for a folder or for an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// A directory or file shown in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    label: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeNode {
    /// Directory or file name. The root carries the archive file name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in display order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A rooted tree of archive folders and files.
#[derive(Debug, Clone)]
pub struct DisplayTree {
    nodes: Vec<TreeNode>,
}

impl DisplayTree {
    const ROOT: NodeId = NodeId(0);

    /// Create a tree holding only a root labelled `root_label`.
    #[must_use]
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            nodes: vec![TreeNode {
                label: root_label.into(),
                kind: NodeKind::Directory,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Append a new node as the last child of `parent`.
    pub(crate) fn push_child(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            label: label.into(),
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// First child of `parent` labelled `label`.
    pub fn find_child(&self, parent: NodeId, label: &str) -> Option<NodeId> {
        self.nodes
            .get(parent.0)?
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].label == label)
    }

    /// First child of `parent` labelled `label` with the given kind.
    pub(crate) fn find_child_of_kind(
        &self,
        parent: NodeId,
        label: &str,
        kind: NodeKind,
    ) -> Option<NodeId> {
        self.nodes
            .get(parent.0)?
            .children
            .iter()
            .copied()
            .find(|child| {
                let node = &self.nodes[child.0];
                node.kind == kind && node.label == label
            })
    }

    pub(crate) fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.nodes[id.0].children = children;
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// The archive display name.
    #[must_use]
    pub fn root_label(&self) -> &str {
        &self.nodes[Self::ROOT.0].label
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Look up a node, failing with [`Error::InvalidNode`] for foreign ids.
    pub fn node(&self, id: NodeId) -> Result<&TreeNode> {
        self.get(id).ok_or(Error::InvalidNode(id.0))
    }

    pub fn label(&self, id: NodeId) -> Result<&str> {
        Ok(self.node(id)?.label())
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Parent of `id`; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent())
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Leaves are file nodes. A folder without files is still a folder.
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.kind == NodeKind::File)
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.ids().filter(|&id| self.is_leaf(id)).count()
    }

    /// Number of non-leaf nodes, root included.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.node_count() - self.leaf_count()
    }

    /// Path of `id` below the root: ancestor labels joined by `/`, the root
    /// label excluded. The root itself maps to `""`.
    pub fn path_of(&self, id: NodeId) -> Result<String> {
        let mut labels = Vec::new();
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            labels.push(current.label.as_str());
            current = self.node(parent)?;
        }
        labels.reverse();
        Ok(segment::join(labels))
    }

    /// Path of the folder containing `id` (the path of its parent).
    pub fn directory_path_of(&self, id: NodeId) -> Result<String> {
        match self.node(id)?.parent {
            Some(parent) => self.path_of(parent),
            None => Ok(String::new()),
        }
    }

    /// Walk labels from the root. `""` finds the root. Every segment but the
    /// last must name a folder; the last one may name either kind, and with
    /// duplicate labels the first matching child wins.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return Some(Self::ROOT);
        }
        let (folders, last) = match path.rsplit_once(SEPARATOR) {
            Some((folders, last)) => (Some(folders), last),
            None => (None, path),
        };
        let parent = folders.into_iter().flat_map(|f| f.split(SEPARATOR)).try_fold(
            Self::ROOT,
            |node, label| self.find_child_of_kind(node, label, NodeKind::Directory),
        )?;
        self.find_child(parent, last)
    }

    /// All node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Depth-first pre-order walk in display order, with depths (root = 0).
    #[must_use]
    pub fn walk(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(Self::ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for &child in self.nodes[id.0].children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    /// Leaves in display order.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .map(|(id, _)| id)
            .filter(|&id| self.is_leaf(id))
            .collect()
    }

    /// Indented outline, one node per line. Non-leaf nodes end in `/`.
    ///
    /// ```text
    /// pak01_dir.vpk/
    ///   sound/
    ///     ambient/
    ///       wind.wav
    ///   a.txt
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (id, depth) in self.walk() {
            for _ in 0..depth {
                out.push_str("  ");
            }
            out.push_str(&self.nodes[id.0].label);
            if !self.is_leaf(id) {
                out.push(SEPARATOR);
            }
            out.push('\n');
        }
        out
    }
}
