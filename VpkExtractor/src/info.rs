//! Text shown in the info pane for the selected tree node

/// What the info pane shows for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeInfo {
    /// The archive root: header metadata
    Header(String),
    /// A file: its contents as (lossy) UTF-8 text
    Contents(String),
    /// A folder, nothing selected, or a file that no longer maps to an entry
    Empty,
}

impl NodeInfo {
    /// Decode file contents for display.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::Contents(String::from_utf8_lossy(data).into_owned())
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Header(text) | Self::Contents(text) => text,
            Self::Empty => "",
        }
    }
}
