//! Data model for the Zoomfolder directory tree.
//!
//! Re-exports the arena-allocated tree and supporting types.
pub mod node;
pub mod size;
pub mod tree;

pub use node::{DirNode, NodeIndex, NAME_CAPACITY};
pub use tree::{DirTree, TreeError};
