//! Progress state shared between an extraction worker and its observers

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vpkcore::extract::ExtractionProgress;

/// Shared progress state that can be updated from a worker thread
/// and polled from the UI thread
#[derive(Clone, Debug, Default)]
pub struct SharedProgress {
    /// Fraction processed (0.0 - 1.0), stored as `f32` bits for atomic access
    fraction_bits: Arc<AtomicU32>,
    /// Directories finished
    current: Arc<AtomicUsize>,
    /// Directories selected
    total: Arc<AtomicUsize>,
    /// Current progress message
    message: Arc<Mutex<String>>,
}

impl SharedProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a progress event (lock-free except for the message)
    pub fn update(&self, progress: &ExtractionProgress) {
        self.fraction_bits
            .store(progress.fraction().to_bits(), Ordering::SeqCst);
        self.current.store(progress.current, Ordering::SeqCst);
        self.total.store(progress.total, Ordering::SeqCst);
        if let Ok(mut msg) = self.message.lock() {
            *msg = progress
                .current_directory
                .clone()
                .unwrap_or_else(|| progress.phase.as_str().to_string());
        }
    }

    /// Fraction processed, 0.0 when idle
    pub fn fraction(&self) -> f32 {
        f32::from_bits(self.fraction_bits.load(Ordering::SeqCst))
    }

    /// Get current and total directory counts
    pub fn counts(&self) -> (usize, usize) {
        (
            self.current.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }

    /// Get current message
    pub fn message(&self) -> String {
        self.message.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Reset progress to initial state (call when starting a new operation)
    pub fn reset(&self) {
        self.update(&ExtractionProgress::idle());
        if let Ok(mut msg) = self.message.lock() {
            msg.clear();
        }
    }
}
