//! A single directory in the arena-allocated scan tree.
//!
//! Nodes live in a flat `Vec<DirNode>` owned by [`DirTree`](super::DirTree).
//! Parent and child links are `NodeIndex` values rather than references, so
//! appending a sibling never invalidates a handle to an existing node.
use compact_str::CompactString;

/// Maximum stored length of a node name, in bytes.
///
/// Longer names are cut at the nearest UTF-8 boundary below this limit.
pub const NAME_CAPACITY: usize = 255;

/// Lightweight index into the arena `Vec<DirNode>`.
///
/// Uses `u32` to keep nodes small — supports up to ~4 billion directories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One directory (or the scan root) in the tree.
///
/// Regular files are not stored as nodes; their bytes are folded into the
/// directory that contains them.
#[derive(Debug, Clone)]
pub struct DirNode {
    /// Path segment only. The root carries the full scan path.
    pub name: CompactString,

    /// Aggregate byte count of this directory and everything beneath it.
    /// Only ever grows while the scan runs.
    pub size: u64,

    /// Aggregate count of regular files beneath this directory.
    pub file_count: u32,

    /// Animated approximation of `size`, chased a little every frame.
    /// Layout and hit testing use this value, never `size`.
    pub display_size: f64,

    /// Owning parent. `None` for the root.
    pub parent: Option<NodeIndex>,

    /// Children in insertion order until `DirTree::sort_children` is called
    /// on this node.
    pub children: Vec<NodeIndex>,

    /// Set once the subtree rooted here has been fully walked. Never reset.
    pub complete: bool,
}

impl DirNode {
    /// Create an empty, incomplete node.
    pub fn new(name: &str, parent: Option<NodeIndex>) -> Self {
        Self {
            name: CompactString::new(truncate_name(name)),
            size: 0,
            file_count: 0,
            display_size: 0.0,
            parent,
            children: Vec::new(),
            complete: false,
        }
    }

    /// Number of immediate children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Cut `name` to at most [`NAME_CAPACITY`] bytes without splitting a character.
fn truncate_name(name: &str) -> &str {
    if name.len() <= NAME_CAPACITY {
        return name;
    }
    let mut end = NAME_CAPACITY;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
