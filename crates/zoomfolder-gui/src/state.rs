//! Application state management.
//!
//! Centralises all mutable state that the UI reads and writes. The scan
//! thread shares its tree through the [`ScanHandle`] lock; completion is
//! picked up in [`AppState::process_scan_events`], which runs once per frame.
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};
use zoomfolder_core::model::DirNode;
use zoomfolder_core::scanner::progress::ScanEvent;
use zoomfolder_core::scanner::{self, ScanHandle, ScanSnapshot};
use zoomfolder_core::view::Camera;

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// No folder opened yet.
    Welcome,
    /// A scan is running; the tree grows on screen.
    Scanning,
    /// The scan finished or was stopped.
    Viewing,
}

/// Tooltip contents for the hovered row, copied out while the tree is locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    pub name: String,
    pub size: u64,
    pub file_count: u32,
}

impl HoverInfo {
    pub fn from_node(node: &DirNode) -> Self {
        Self {
            name: node.name.to_string(),
            size: node.size,
            file_count: node.file_count,
        }
    }
}

/// All application state.
pub struct AppState {
    // ── Scan ───────────────────────────────────────────
    pub phase: AppPhase,
    pub scan: Option<ScanHandle>,
    /// Counters copied from the scan at the start of the frame.
    pub snapshot: ScanSnapshot,
    pub scan_duration: Option<Duration>,
    /// True if the most recent scan was cancelled (partial results).
    pub scan_was_cancelled: bool,

    // ── View ───────────────────────────────────────────
    pub camera: Camera,
    pub hovered: Option<HoverInfo>,
    /// Some displayed size was still moving last frame.
    pub animating: bool,

    // ── UI state ───────────────────────────────────────
    /// Contents of the folder path field.
    pub path_input: String,
    /// Shown in the status bar until the next folder is opened.
    pub last_error: Option<String>,
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: AppPhase::Welcome,
            scan: None,
            snapshot: ScanSnapshot::default(),
            scan_duration: None,
            scan_was_cancelled: false,
            camera: Camera::new(),
            hovered: None,
            animating: false,
            path_input: String::new(),
            last_error: None,
            dark_mode: true,
        }
    }

    /// Release the current scan (if any), reset the view and start scanning
    /// `path`. Returns `false` if the scan could not be started.
    pub fn open_folder(&mut self, path: PathBuf) -> bool {
        if !path.is_dir() {
            warn!("Refusing to open {}: not a folder", path.display());
            self.last_error = Some(format!("Not a folder: {}", path.display()));
            return false;
        }

        if let Some(old) = self.scan.take() {
            old.free();
        }
        self.camera.reset();
        self.snapshot = ScanSnapshot::default();
        self.scan_duration = None;
        self.scan_was_cancelled = false;
        self.hovered = None;
        self.animating = false;
        self.last_error = None;
        self.path_input = path.to_string_lossy().into_owned();

        match scanner::start_scan(&path) {
            Ok(handle) => {
                info!("Opened {}", path.display());
                self.scan = Some(handle);
                self.phase = AppPhase::Scanning;
                true
            }
            Err(e) => {
                warn!("Could not scan {}: {e}", path.display());
                self.last_error = Some(e.to_string());
                self.phase = AppPhase::Welcome;
                false
            }
        }
    }

    /// Open whatever folder is typed into the path field.
    pub fn open_path_input(&mut self) -> bool {
        let input = self.path_input.trim();
        if input.is_empty() {
            self.last_error = Some("Enter a folder path".to_owned());
            return false;
        }
        let path = PathBuf::from(input);
        self.open_folder(path)
    }

    /// Stop a running scan, keeping what it has found so far.
    pub fn cancel_scan(&mut self) {
        if self.phase != AppPhase::Scanning {
            return;
        }
        if let Some(handle) = self.scan.as_mut() {
            handle.cancel();
        }
    }

    /// Snap the camera back to the whole-folder view.
    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// Flip between the dark and light palettes. The view and scan are kept.
    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Refresh the scan counters and handle the terminal event. Called once
    /// per frame; returns `true` when the phase changed.
    pub fn process_scan_events(&mut self) -> bool {
        let Some(handle) = &self.scan else {
            return false;
        };
        self.snapshot = handle.poll();

        let mut changed = false;
        while let Ok(event) = handle.events().try_recv() {
            changed = true;
            match event {
                ScanEvent::Finished { duration, .. } => {
                    self.scan_duration = Some(duration);
                    self.phase = AppPhase::Viewing;
                }
                ScanEvent::Cancelled => {
                    self.scan_was_cancelled = true;
                    self.phase = AppPhase::Viewing;
                }
            }
        }

        if self.phase == AppPhase::Scanning && (self.snapshot.done || self.snapshot.cancelled) {
            self.scan_was_cancelled = self.snapshot.cancelled;
            self.phase = AppPhase::Viewing;
            changed = true;
        }
        changed
    }

    /// Whether another frame is needed without user input.
    pub fn needs_repaint(&self) -> bool {
        self.phase == AppPhase::Scanning || self.animating || !self.camera.is_settled()
    }
}
