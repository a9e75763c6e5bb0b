//! Terminal scan events, sent once from the scan thread to whoever listens.
//!
//! Live counters are read with [`ScanHandle::poll`](super::ScanHandle::poll);
//! these messages only report how the scan ended.
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// The whole tree was walked. Totals mirror the root node.
    Finished {
        duration: Duration,
        total_size: u64,
        total_files: u32,
        /// Directories or entries that could not be read.
        skipped: u64,
    },
    /// The scan stopped early on request. The tree keeps what was found.
    Cancelled,
}
