//! Which archive directories an extraction covers

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tree::{DisplayTree, NodeId};

/// Directory selection for extraction.
///
/// `Prefixes` matches on the raw path string, not on path segments: the
/// prefix `"models"` also selects `"models2/x"`. An empty prefix set selects
/// nothing; the prefix `""` selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Every directory in the archive
    #[default]
    All,
    /// Directories whose path starts with one of these strings
    Prefixes(IndexSet<String>),
}

impl Selection {
    /// Select nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::Prefixes(IndexSet::new())
    }

    /// Select directories starting with any of `prefixes`.
    pub fn prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Prefixes(prefixes.into_iter().map(Into::into).collect())
    }

    /// Build a selection from nodes picked in the display tree.
    ///
    /// Each node contributes its path below the root, so picking the root
    /// contributes `""` and selects every directory. A picked file
    /// contributes its full `dir/name` path, which only matches directories
    /// whose own path begins with that string.
    pub fn from_nodes(tree: &DisplayTree, ids: &[NodeId]) -> Result<Self> {
        let mut prefixes = IndexSet::with_capacity(ids.len());
        for &id in ids {
            prefixes.insert(tree.path_of(id)?);
        }
        Ok(Self::Prefixes(prefixes))
    }

    /// Whether a directory with this path is selected.
    #[must_use]
    pub fn matches(&self, directory_path: &str) -> bool {
        match self {
            Self::All => true,
            Self::Prefixes(prefixes) => prefixes.iter().any(|p| directory_path.starts_with(p.as_str())),
        }
    }

    /// True when no directory can match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Prefixes(p) if p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use crate::tree::build_display_tree;

    #[test]
    fn test_all_matches_everything() {
        assert!(Selection::All.matches(""));
        assert!(Selection::All.matches("models/props"));
        assert!(!Selection::All.is_empty());
    }

    #[test]
    fn test_prefix_match_is_raw_string() {
        let selection = Selection::prefixes(["models"]);
        assert!(selection.matches("models"));
        assert!(selection.matches("models/props"));
        assert!(selection.matches("models2/x"));
        assert!(!selection.matches("textures"));
        assert!(!selection.matches(""));
    }

    #[test]
    fn test_empty_selection_matches_nothing() {
        let selection = Selection::none();
        assert!(selection.is_empty());
        assert!(!selection.matches(""));
        assert!(!selection.matches("models"));
    }

    #[test]
    fn test_prefixes_are_deduplicated() {
        let Selection::Prefixes(set) = Selection::prefixes(["a", "b", "a"]) else {
            panic!("expected prefixes");
        };
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_nodes() {
        let archive = MemoryArchive::new("a.vpk")
            .with_directory("sound/ambient", [("wind.wav", b"w".to_vec())])
            .with_directory("models", [("crate.mdl", b"m".to_vec())]);
        let tree = build_display_tree(&archive).unwrap();

        let ambient = tree.find("sound/ambient").unwrap();
        let selection = Selection::from_nodes(&tree, &[ambient]).unwrap();
        assert_eq!(selection, Selection::prefixes(["sound/ambient"]));
        assert!(!selection.matches("models"));

        let everything = Selection::from_nodes(&tree, &[tree.root()]).unwrap();
        assert!(everything.matches("models"));
        assert!(everything.matches("sound/ambient"));
    }

    #[test]
    fn test_serde_round_trip() {
        let selection = Selection::prefixes(["materials", "models"]);
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"Prefixes":["materials","models"]}"#);
        let back: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }
}
