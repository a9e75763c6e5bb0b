//! Zoomfolder GUI — egui-based desktop frontend.
//!
//! This crate contains all UI code. Business logic lives in `zoomfolder-core`.
pub mod app;
pub mod icon;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{ViewerOptions, ZoomfolderApp, ZoomfolderState};
