//! VpkExtractor - browse and extract VPK archives
//!
//! The layer a desktop shell talks to: it opens archives into sessions,
//! answers info pane requests, and runs extractions in the background while
//! the shell polls progress.
//!
//! ```no_run
//! use vpkextractor::Extractor;
//! use vpkextractor::config::ExtractorConfig;
//! use vpkcore::archive::MemoryArchive;
//!
//! let mut extractor = Extractor::new(ExtractorConfig::load());
//! extractor.open(MemoryArchive::new("pak01_dir.vpk").with_directory("", [("a.txt", b"a".to_vec())]))?;
//!
//! let handle = extractor.extract_all()?;
//! for event in handle.events() {
//!     println!("{:.0}%", event.fraction() * 100.0);
//! }
//! let report = handle.join()?;
//! println!("{} files written", report.files_written);
//! # Ok::<(), vpkextractor::Error>(())
//! ```

// Re-export vpkcore
pub use vpkcore;

pub mod config;
pub mod error;
pub mod info;
pub mod progress;
pub mod session;
pub mod worker;

pub use error::{Error, Result};
pub use info::NodeInfo;
pub use progress::SharedProgress;
pub use session::ArchiveSession;
pub use worker::ExtractionHandle;

use vpkcore::archive::Archive;
use vpkcore::extract::Selection;
use vpkcore::tree::NodeId;

use config::ExtractorConfig;

/// Main extractor interface: settings plus the currently open archive.
pub struct Extractor<A> {
    config: ExtractorConfig,
    session: Option<ArchiveSession<A>>,
}

impl<A: Archive> Extractor<A> {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ExtractorConfig {
        &mut self.config
    }

    /// Open an archive, replacing the current one.
    ///
    /// The previous session (tree, info cache, selection) is dropped only if
    /// the new archive opens successfully.
    pub fn open(&mut self, archive: A) -> Result<&ArchiveSession<A>> {
        let name = archive.file_name().to_string();
        let session = ArchiveSession::open(archive)?;
        self.config.add_recent_archive(&name);
        Ok(&*self.session.insert(session))
    }

    pub fn session(&self) -> Option<&ArchiveSession<A>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut ArchiveSession<A>> {
        self.session.as_mut()
    }

    /// Drop the open archive.
    pub fn close(&mut self) {
        self.session = None;
    }

    /// Info pane contents for the selected node of the open archive.
    pub fn node_info(&mut self, selected: Option<NodeId>) -> Result<NodeInfo> {
        self.session
            .as_mut()
            .ok_or(Error::NoArchiveOpen)?
            .node_info(selected)
    }
}

impl<A: Archive + Send + Sync + 'static> Extractor<A> {
    /// Extract the whole open archive in the background.
    pub fn extract_all(&self) -> Result<ExtractionHandle> {
        self.extract(Selection::All)
    }

    /// Extract the directories under the selected tree nodes in the background.
    pub fn extract_selected(&self, ids: &[NodeId]) -> Result<ExtractionHandle> {
        let session = self.session.as_ref().ok_or(Error::NoArchiveOpen)?;
        self.extract(session.selection_for(ids)?)
    }

    fn extract(&self, selection: Selection) -> Result<ExtractionHandle> {
        let session = self.session.as_ref().ok_or(Error::NoArchiveOpen)?;
        session.spawn_extraction(self.config.extraction_options(selection))
    }
}
