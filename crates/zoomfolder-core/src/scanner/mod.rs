//! Scanner module — walks a folder on a background thread into a shared tree.
//!
//! The worker and every reader share one [`ScanState`]. A single
//! `parking_lot::Mutex` guards the tree and the scan counters; the UI holds it
//! for a whole frame (size animation, layout, hit test) and the worker takes
//! it for each individual mutation.
pub mod enumerate;
pub mod progress;
mod walk;

use crate::model::DirTree;
use enumerate::{DirEnumerator, FsEnumerator};
use progress::ScanEvent;
use walk::{WalkOutcome, Walker};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Mutex, MutexGuard};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Capacity of the terminal-event channel. Only one event is ever sent.
pub const EVENT_CHANNEL_CAPACITY: usize = 4;

/// Stack reserved for the scan thread. The walk recurses once per directory
/// level, so deep trees need more than the platform default.
const SCANNER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Errors raised when a scan cannot start.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Everything the scan lock protects.
#[derive(Debug)]
pub struct ScanTree {
    pub tree: DirTree,
    /// Set together with the final `total_size`, only on a full walk.
    pub done: bool,
    /// Set when the worker stopped on a cancel request.
    pub cancelled: bool,
    /// Running byte total; equals the root size once `done` is set.
    pub total_size: u64,
    pub total_files: u32,
    /// Unreadable directories and entries, skipped without a trace in the tree.
    pub skipped: u64,
}

/// Non-blocking copy of the scan counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSnapshot {
    pub done: bool,
    pub cancelled: bool,
    pub total_size: u64,
    pub total_files: u32,
    pub skipped: u64,
}

/// Per-scan shared state: the locked tree plus the cooperative cancel flag.
#[derive(Debug)]
pub struct ScanState {
    inner: Mutex<ScanTree>,
    cancel: AtomicBool,
    root_path: PathBuf,
}

impl ScanState {
    fn new(root_path: PathBuf) -> Self {
        let tree = DirTree::new(&root_path.to_string_lossy());
        Self {
            inner: Mutex::new(ScanTree {
                tree,
                done: false,
                cancelled: false,
                total_size: 0,
                total_files: 0,
                skipped: 0,
            }),
            cancel: AtomicBool::new(false),
            root_path,
        }
    }

    /// Lock the tree. Hold the guard for the whole of a traversal.
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, ScanTree> {
        self.inner.lock()
    }

    /// Ask the worker to stop at its next entry.
    #[inline]
    pub fn request_cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    fn snapshot(&self) -> ScanSnapshot {
        let scan = self.lock();
        ScanSnapshot {
            done: scan.done,
            cancelled: scan.cancelled,
            total_size: scan.total_size,
            total_files: scan.total_files,
            skipped: scan.skipped,
        }
    }
}

/// Handle to a running or finished scan.
///
/// Dropping the handle cancels a scan that is still running and waits for the
/// worker to exit before the tree is released.
pub struct ScanHandle {
    state: Arc<ScanState>,
    events_rx: Receiver<ScanEvent>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Lock the shared tree.
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, ScanTree> {
        self.state.lock()
    }

    /// Copy the current counters. Takes the lock only briefly.
    pub fn poll(&self) -> ScanSnapshot {
        self.state.snapshot()
    }

    /// Receiver for the single terminal [`ScanEvent`].
    pub fn events(&self) -> &Receiver<ScanEvent> {
        &self.events_rx
    }

    /// The folder being scanned.
    pub fn root_path(&self) -> &Path {
        &self.state.root_path
    }

    /// `true` while the worker thread has not exited.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Request a cooperative stop and block until the worker exits.
    ///
    /// Latency is bounded by the slowest single filesystem call in flight.
    pub fn cancel(&mut self) {
        self.state.request_cancel();
        self.join();
    }

    /// Cancel if still running, wait for the worker, then release the tree.
    pub fn free(self) {
        drop(self);
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("scanner thread panicked");
            }
        }
    }
}

impl Drop for ScanHandle {
    fn drop(&mut self) {
        if !self.poll().done {
            self.state.request_cancel();
        }
        self.join();
    }
}

/// Start scanning `root_path` on the real filesystem.
pub fn start_scan(root_path: impl Into<PathBuf>) -> Result<ScanHandle, ScanError> {
    start_scan_with(root_path, FsEnumerator)
}

/// Start scanning `root_path` through any [`DirEnumerator`].
///
/// Returns immediately; the tree fills in on a thread named
/// `zoomfolder-scanner`.
pub fn start_scan_with<E: DirEnumerator>(
    root_path: impl Into<PathBuf>,
    enumerator: E,
) -> Result<ScanHandle, ScanError> {
    let state = Arc::new(ScanState::new(root_path.into()));
    let (events_tx, events_rx) = crossbeam_channel::bounded::<ScanEvent>(EVENT_CHANNEL_CAPACITY);

    let worker_state = Arc::clone(&state);
    let thread = thread::Builder::new()
        .name("zoomfolder-scanner".into())
        .stack_size(SCANNER_STACK_SIZE)
        .spawn(move || run_scan(&worker_state, &enumerator, &events_tx))
        .map_err(ScanError::Spawn)?;

    Ok(ScanHandle {
        state,
        events_rx,
        thread: Some(thread),
    })
}

fn run_scan<E: DirEnumerator>(state: &ScanState, enumerator: &E, events_tx: &Sender<ScanEvent>) {
    let start = Instant::now();
    info!("Starting scan of {}", state.root_path.display());

    let root = state.lock().tree.root();
    let outcome = Walker::new(state, enumerator).walk(root, &state.root_path);

    let event = match outcome {
        WalkOutcome::Finished => {
            let mut scan = state.lock();
            // Root children are ordered once, with the final totals.
            scan.tree.sort_children(root);
            scan.tree.mark_complete(root);
            let root_node = scan.tree.node(root);
            let (total_size, total_files) = (root_node.size, root_node.file_count);
            scan.total_size = total_size;
            scan.total_files = total_files;
            scan.done = true;
            let skipped = scan.skipped;
            drop(scan);

            let duration = start.elapsed();
            info!(
                "Scan complete: {total_files} files, {total_size} bytes, {skipped} skipped in {duration:?}"
            );
            ScanEvent::Finished {
                duration,
                total_size,
                total_files,
                skipped,
            }
        }
        WalkOutcome::Cancelled => {
            state.lock().cancelled = true;
            info!("Scan of {} cancelled", state.root_path.display());
            ScanEvent::Cancelled
        }
    };

    // Nobody may be listening; never block the worker on it.
    let _ = events_tx.try_send(event);
}
