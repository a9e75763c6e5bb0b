//! Depth-first walk that grows the shared tree.
//!
//! Every mutation happens under the scan lock, one step at a time. The lock
//! is never held across a recursive call or an enumeration call, so readers
//! see finished siblings while deeper directories are still being walked.
use super::enumerate::{DirEnumerator, EntryKind};
use super::ScanState;
use crate::model::NodeIndex;
use std::path::Path;
use tracing::{debug, warn};

/// How a walk of one directory ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkOutcome {
    Finished,
    Cancelled,
}

pub(crate) struct Walker<'a, E> {
    state: &'a ScanState,
    enumerator: &'a E,
}

impl<'a, E: DirEnumerator> Walker<'a, E> {
    pub(crate) fn new(state: &'a ScanState, enumerator: &'a E) -> Self {
        Self { state, enumerator }
    }

    /// Walk `path` into `node`.
    ///
    /// On return with `Finished`, `node`'s own size and file count are final.
    /// Its parent is responsible for folding them upward.
    pub(crate) fn walk(&self, node: NodeIndex, path: &Path) -> WalkOutcome {
        let entries = match self.enumerator.read_dir(path) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(path = %path.display(), %err, "skipping unreadable directory");
                self.state.lock().skipped += 1;
                return WalkOutcome::Finished;
            }
        };

        for entry in entries {
            if self.state.is_cancelled() {
                return WalkOutcome::Cancelled;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(dir = %path.display(), %err, "skipping unreadable entry");
                    self.state.lock().skipped += 1;
                    continue;
                }
            };

            match entry.kind {
                EntryKind::Directory => {
                    let added = self.state.lock().tree.add_child(node, &entry.name);
                    let child = match added {
                        Ok(child) => child,
                        Err(err) => {
                            warn!(dir = %path.display(), %err, "directory dropped from scan");
                            continue;
                        }
                    };

                    if self.walk(child, &path.join(entry.name.as_str())) == WalkOutcome::Cancelled
                    {
                        return WalkOutcome::Cancelled;
                    }

                    let mut scan = self.state.lock();
                    scan.tree.absorb_child(node, child);
                    scan.tree.sort_children(child);
                    scan.tree.mark_complete(child);
                }
                EntryKind::File { size } => {
                    let mut scan = self.state.lock();
                    scan.tree.add_file(node, size);
                    scan.total_size = scan.total_size.saturating_add(size);
                    scan.total_files = scan.total_files.saturating_add(1);
                }
                EntryKind::Other => {}
            }
        }

        WalkOutcome::Finished
    }
}
