//! Directory enumeration — the one platform-facing call the scanner makes.
//!
//! The walk in [`super::walk`] is written once against [`DirEnumerator`].
//! [`FsEnumerator`] reads the real filesystem; [`MemoryEnumerator`] serves a
//! fixed in-memory table so scans can be reproduced exactly in tests.
use compact_str::CompactString;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// What a directory entry turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory to recurse into.
    Directory,
    /// A regular file and its byte size.
    File { size: u64 },
    /// Symlinks, reparse points, devices, sockets. Ignored by the scanner.
    Other,
}

/// One child entry of an enumerated directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: CompactString,
    pub kind: EntryKind,
}

/// Lazily produced entries of one directory, in unspecified order.
///
/// Each item is fetched on demand so the caller can stop between
/// metadata calls. A per-entry `Err` means that entry alone is unreadable.
pub type Entries<'a> = Box<dyn Iterator<Item = io::Result<DirEntryInfo>> + 'a>;

/// Capability to list the children of a directory.
pub trait DirEnumerator: Send + Sync + 'static {
    /// Open `path` and return its entries. `Err` means the directory itself
    /// could not be read.
    fn read_dir<'a>(&'a self, path: &Path) -> io::Result<Entries<'a>>;
}

// ── Real filesystem ─────────────────────────────────────────────────

/// Enumerates the host filesystem without following links.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsEnumerator;

impl DirEnumerator for FsEnumerator {
    fn read_dir<'a>(&'a self, path: &Path) -> io::Result<Entries<'a>> {
        let dir = std::fs::read_dir(path)?;
        Ok(Box::new(dir.map(|entry| {
            let entry = entry?;
            // lstat: never follow the link.
            let meta = std::fs::symlink_metadata(entry.path())?;
            Ok(DirEntryInfo {
                name: CompactString::new(entry.file_name().to_string_lossy()),
                kind: classify(&meta),
            })
        })))
    }
}

fn classify(meta: &std::fs::Metadata) -> EntryKind {
    let ft = meta.file_type();
    if ft.is_symlink() || is_reparse_point(meta) {
        EntryKind::Other
    } else if ft.is_dir() {
        EntryKind::Directory
    } else if ft.is_file() {
        EntryKind::File { size: meta.len() }
    } else {
        EntryKind::Other
    }
}

/// Junctions and mount points are reparse points that `is_symlink` misses.
#[cfg(windows)]
fn is_reparse_point(meta: &std::fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    use windows::Win32::Storage::FileSystem::FILE_ATTRIBUTE_REPARSE_POINT;
    meta.file_attributes() & FILE_ATTRIBUTE_REPARSE_POINT.0 != 0
}

#[cfg(not(windows))]
fn is_reparse_point(_meta: &std::fs::Metadata) -> bool {
    false
}

// ── In-memory table ─────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Slot {
    Entry(DirEntryInfo),
    /// An entry whose metadata read fails.
    Broken(CompactString),
}

/// A fixed directory table, built up front with the builder methods.
///
/// ```
/// use zoomfolder_core::scanner::enumerate::MemoryEnumerator;
///
/// let fs = MemoryEnumerator::new()
///     .file("/scan/a/one.bin", 1000)
///     .file("/scan/b/two.bin", 2000)
///     .dir("/scan/empty");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryEnumerator {
    dirs: HashMap<PathBuf, Vec<Slot>>,
    unreadable: HashSet<PathBuf>,
}

impl MemoryEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and any missing ancestors.
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.ensure_dir(path.as_ref());
        self
    }

    /// Add a regular file of `size` bytes, creating its parent directories.
    pub fn file(self, path: impl AsRef<Path>, size: u64) -> Self {
        self.leaf(path.as_ref(), EntryKind::File { size })
    }

    /// Add a symlink-like entry the scanner must ignore.
    pub fn link(self, path: impl AsRef<Path>) -> Self {
        self.leaf(path.as_ref(), EntryKind::Other)
    }

    /// Add an entry whose metadata cannot be read.
    pub fn broken(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            self.ensure_dir(parent);
            self.slots(parent)
                .push(Slot::Broken(CompactString::new(name.to_string_lossy())));
        }
        self
    }

    /// Add a directory that is listed by its parent but refuses to open.
    pub fn unreadable(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.ensure_dir(path);
        self.unreadable.insert(path.to_path_buf());
        self
    }

    fn leaf(mut self, path: &Path, kind: EntryKind) -> Self {
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            self.ensure_dir(parent);
            self.slots(parent).push(Slot::Entry(DirEntryInfo {
                name: CompactString::new(name.to_string_lossy()),
                kind,
            }));
        }
        self
    }

    fn ensure_dir(&mut self, path: &Path) {
        if self.dirs.contains_key(path) {
            return;
        }
        self.dirs.insert(path.to_path_buf(), Vec::new());
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if !parent.as_os_str().is_empty() {
                self.ensure_dir(parent);
                self.slots(parent).push(Slot::Entry(DirEntryInfo {
                    name: CompactString::new(name.to_string_lossy()),
                    kind: EntryKind::Directory,
                }));
            }
        }
    }

    fn slots(&mut self, dir: &Path) -> &mut Vec<Slot> {
        self.dirs.entry(dir.to_path_buf()).or_default()
    }
}

impl DirEnumerator for MemoryEnumerator {
    fn read_dir<'a>(&'a self, path: &Path) -> io::Result<Entries<'a>> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", path.display()),
            ));
        }
        let slots = self.dirs.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })?;
        Ok(Box::new(slots.iter().map(|slot| match slot {
            Slot::Entry(info) => Ok(info.clone()),
            Slot::Broken(name) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot stat {name}"),
            )),
        })))
    }
}
