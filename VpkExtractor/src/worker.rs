//! Background extraction worker

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryIter};
use std::thread::{self, JoinHandle};

use vpkcore::archive::Archive;
use vpkcore::extract::{ExtractionOptions, ExtractionProgress, ExtractionReport, extract_with_progress};

use crate::error::{Error, Result};
use crate::progress::SharedProgress;

/// Marks a session as busy for as long as it is alive.
#[derive(Debug)]
pub(crate) struct RunGuard(Arc<AtomicBool>);

impl RunGuard {
    pub(crate) fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::ExtractionInProgress)?;
        Ok(Self(Arc::clone(flag)))
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A running extraction.
///
/// Progress events arrive in order, one per finished directory and a final
/// idle event; the channel closes when the worker ends.
#[derive(Debug)]
pub struct ExtractionHandle {
    events: Receiver<ExtractionProgress>,
    thread: JoinHandle<ExtractionReport>,
}

impl ExtractionHandle {
    /// Blocking iterator over progress events until the worker finishes.
    pub fn events(&self) -> impl Iterator<Item = ExtractionProgress> + '_ {
        self.events.iter()
    }

    /// Events already delivered, without blocking.
    pub fn try_events(&self) -> TryIter<'_, ExtractionProgress> {
        self.events.try_iter()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker and return its report.
    pub fn join(self) -> Result<ExtractionReport> {
        self.thread.join().map_err(|_| Error::WorkerPanicked)
    }
}

/// Run an extraction on its own thread.
pub(crate) fn spawn<A>(
    archive: Arc<A>,
    options: ExtractionOptions,
    shared: SharedProgress,
    guard: RunGuard,
) -> Result<ExtractionHandle>
where
    A: Archive + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel();
    shared.reset();

    let thread = thread::Builder::new()
        .name("vpk-extract".to_string())
        .spawn(move || {
            let _guard = guard;
            extract_with_progress(archive.as_ref(), &options, &|progress| {
                shared.update(progress);
                // Nobody listening is fine; the report still comes back on join
                let _ = tx.send(progress.clone());
            })
        })?;

    Ok(ExtractionHandle { events: rx, thread })
}
