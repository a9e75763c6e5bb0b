//! Zoomfolder Core — directory tree, background scanner, and view math.
//!
//! This crate contains all business logic with zero UI dependencies.
//!
//! # Modules
//!
//! - [`model`] — Arena-allocated directory tree and size formatting.
//! - [`scanner`] — Background folder scanning into a shared, locked tree.
//! - [`view`] — Camera, icicle layout, and hit testing.
pub mod model;
pub mod scanner;
pub mod view;
