//! Arena-backed directory tree that the scanner grows while the UI reads it.
//!
//! All nodes live in a single `Vec<DirNode>`. Relationships between nodes use
//! `NodeIndex` rather than references, which keeps every handle valid across
//! sibling insertions. The tree never propagates sizes upward on its own:
//! callers fold a finished child into its parent with [`DirTree::absorb_child`].
use super::node::{DirNode, NodeIndex};
use std::collections::TryReserveError;
use thiserror::Error;

/// Initial capacity of a node's child list. Doubles when full.
const INITIAL_CHILD_CAPACITY: usize = 8;

/// Errors raised while mutating the tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The arena or a child list could not grow. The child was not added.
    #[error("could not allocate child node `{name}`: {source}")]
    Alloc {
        name: String,
        #[source]
        source: TryReserveError,
    },
}

/// The tree produced by one scan. Index 0 is always the root.
#[derive(Debug, Clone)]
pub struct DirTree {
    /// Arena: every node in a flat vector.
    pub nodes: Vec<DirNode>,
}

impl DirTree {
    /// Create a tree holding a single empty root named `name`.
    pub fn new(name: &str) -> Self {
        Self {
            nodes: vec![DirNode::new(name, None)],
        }
    }

    /// Index of the root node.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Append a new, empty child to `parent` and return its index.
    ///
    /// Child lists start with room for eight entries and double when full.
    /// On allocation failure nothing is modified and the child must be
    /// treated as not added.
    pub fn add_child(&mut self, parent: NodeIndex, name: &str) -> Result<NodeIndex, TreeError> {
        let alloc_err = |source| TreeError::Alloc {
            name: name.to_string(),
            source,
        };

        self.nodes.try_reserve(1).map_err(alloc_err)?;

        let children = &mut self.nodes[parent.idx()].children;
        if children.len() == children.capacity() {
            let grow_by = children.capacity().max(INITIAL_CHILD_CAPACITY);
            children.try_reserve_exact(grow_by).map_err(alloc_err)?;
        }

        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(DirNode::new(name, Some(parent)));
        self.nodes[parent.idx()].children.push(idx);
        Ok(idx)
    }

    /// Add `bytes` to exactly one node. Ancestors are left untouched.
    #[inline]
    pub fn add_size(&mut self, node: NodeIndex, bytes: u64) {
        let n = &mut self.nodes[node.idx()];
        n.size = n.size.saturating_add(bytes);
    }

    /// Record one regular file of `bytes` owned directly by `node`.
    #[inline]
    pub fn add_file(&mut self, node: NodeIndex, bytes: u64) {
        self.add_size(node, bytes);
        let n = &mut self.nodes[node.idx()];
        n.file_count = n.file_count.saturating_add(1);
    }

    /// Fold a finished child's totals into its parent.
    pub fn absorb_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        let (size, files) = {
            let c = &self.nodes[child.idx()];
            (c.size, c.file_count)
        };
        let p = &mut self.nodes[parent.idx()];
        p.size = p.size.saturating_add(size);
        p.file_count = p.file_count.saturating_add(files);
    }

    /// Reorder `node`'s own children by size, largest first.
    ///
    /// Not recursive and not stable for equal sizes.
    pub fn sort_children(&mut self, node: NodeIndex) {
        let mut children = std::mem::take(&mut self.nodes[node.idx()].children);
        children.sort_unstable_by(|a, b| self.nodes[b.idx()].size.cmp(&self.nodes[a.idx()].size));
        self.nodes[node.idx()].children = children;
    }

    /// Mark `node` as fully walked.
    #[inline]
    pub fn mark_complete(&mut self, node: NodeIndex) {
        self.nodes[node.idx()].complete = true;
    }

    /// Reconstruct the full path for a node by walking up to the root.
    pub fn full_path(&self, index: NodeIndex) -> std::path::PathBuf {
        let mut segments = Vec::new();
        let mut current = Some(index);
        while let Some(idx) = current {
            segments.push(self.nodes[idx.idx()].name.as_str());
            current = self.nodes[idx.idx()].parent;
        }
        segments.iter().rev().collect()
    }

    /// The `i`-th child of `parent`, re-resolved from the current child list.
    #[inline]
    pub fn child(&self, parent: NodeIndex, i: usize) -> Option<NodeIndex> {
        self.nodes[parent.idx()].children.get(i).copied()
    }

    /// Direct children of a node, in their current order.
    #[inline]
    pub fn children(&self, parent: NodeIndex) -> &[NodeIndex] {
        &self.nodes[parent.idx()].children
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &DirNode {
        &self.nodes[index.idx()]
    }

    /// Get the node at the given index for mutation.
    #[inline]
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut DirNode {
        &mut self.nodes[index.idx()]
    }

    /// Total number of nodes in the tree, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
