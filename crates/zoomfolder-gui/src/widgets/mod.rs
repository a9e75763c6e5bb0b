//! Custom widgets for Zoomfolder.
pub mod icicle;
pub mod status_bar;
pub mod toolbar;
