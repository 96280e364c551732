//! An opened archive and everything derived from it
//!
//! A session is created per opened archive and owns the archive, its sorted
//! display tree, the info pane cache, and the extraction state. Opening
//! another archive means building a new session; nothing is shared between
//! sessions.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use vpkcore::archive::{Archive, ArchiveHeader};
use vpkcore::extract::{
    ExtractionOptions, ExtractionReport, ProgressCallback, Selection, extract_with_progress,
};
use vpkcore::resolve;
use vpkcore::tree::{DisplayTree, NodeId, build_display_tree};

use crate::error::Result;
use crate::info::NodeInfo;
use crate::progress::SharedProgress;
use crate::worker::{self, ExtractionHandle, RunGuard};

pub struct ArchiveSession<A> {
    archive: Arc<A>,
    tree: DisplayTree,
    last_info: Option<(Option<NodeId>, NodeInfo)>,
    progress: SharedProgress,
    running: Arc<AtomicBool>,
}

impl<A: Archive> ArchiveSession<A> {
    /// Open an archive: build and sort its display tree.
    ///
    /// Fails without creating a session if the directory list is malformed.
    pub fn open(archive: A) -> Result<Self> {
        let tree = build_display_tree(&archive)?;
        tracing::info!(
            "Opened {}: {} directories, {} files",
            archive.file_name(),
            archive.directories().len(),
            tree.leaf_count()
        );
        Ok(Self {
            archive: Arc::new(archive),
            tree,
            last_info: None,
            progress: SharedProgress::new(),
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    pub fn tree(&self) -> &DisplayTree {
        &self.tree
    }

    pub fn header(&self) -> ArchiveHeader {
        self.archive.header()
    }

    /// Progress of the current (or last) extraction, for polling.
    pub fn progress(&self) -> &SharedProgress {
        &self.progress
    }

    /// Read a file by its archive path (`dir/name`).
    pub fn resolve_and_read(&self, path: &str) -> Result<Vec<u8>> {
        Ok(resolve::read_path(self.archive.as_ref(), path)?)
    }

    /// Read the file behind a tree leaf.
    pub fn read_node(&self, id: NodeId) -> Result<Vec<u8>> {
        Ok(resolve::resolve_node(self.archive.as_ref(), &self.tree, id)?.read()?)
    }

    /// Info pane contents for the selected node.
    ///
    /// Selecting the same node again returns the cached value without
    /// re-reading the entry. A leaf that no longer resolves shows nothing;
    /// a read failure on a resolved entry is returned as an error.
    pub fn node_info(&mut self, selected: Option<NodeId>) -> Result<NodeInfo> {
        if let Some((last, info)) = &self.last_info
            && *last == selected
        {
            return Ok(info.clone());
        }

        let info = match selected {
            None => NodeInfo::Empty,
            Some(id) if id == self.tree.root() => NodeInfo::Header(self.header().to_string()),
            Some(id) if self.tree.is_leaf(id) => {
                match resolve::resolve_node(self.archive.as_ref(), &self.tree, id) {
                    Ok(resolved) => NodeInfo::from_bytes(&resolved.read()?),
                    Err(vpkcore::Error::NotFound(path)) => {
                        tracing::debug!("Selected node {path} has no entry");
                        NodeInfo::Empty
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Some(_) => NodeInfo::Empty,
        };

        self.last_info = Some((selected, info.clone()));
        Ok(info)
    }

    /// Selection covering the given tree nodes.
    pub fn selection_for(&self, ids: &[NodeId]) -> Result<Selection> {
        Ok(Selection::from_nodes(&self.tree, ids)?)
    }

    /// Extract on the calling thread.
    ///
    /// Returns [`Error::ExtractionInProgress`] if a background extraction of
    /// this session is still running.
    ///
    /// [`Error::ExtractionInProgress`]: crate::Error::ExtractionInProgress
    pub fn extract(
        &self,
        options: &ExtractionOptions,
        progress: ProgressCallback,
    ) -> Result<ExtractionReport> {
        let _guard = RunGuard::acquire(&self.running)?;
        let shared = &self.progress;
        shared.reset();
        Ok(extract_with_progress(self.archive.as_ref(), options, &|p| {
            shared.update(p);
            progress(p);
        }))
    }
}

impl<A: Archive + Send + Sync + 'static> ArchiveSession<A> {
    /// Start an extraction on a worker thread.
    ///
    /// Only one extraction per session may run at a time.
    pub fn spawn_extraction(&self, options: ExtractionOptions) -> Result<ExtractionHandle> {
        let guard = RunGuard::acquire(&self.running)?;
        worker::spawn(
            Arc::clone(&self.archive),
            options,
            self.progress.clone(),
            guard,
        )
    }
}
