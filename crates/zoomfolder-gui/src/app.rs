//! Main `eframe::App` implementation for Zoomfolder.
//!
//! This is the top-level UI layout that composes the toolbar, status bar and
//! icicle canvas, and maps keyboard shortcuts and dropped folders.
use std::path::PathBuf;

use crate::state::{AppPhase, AppState};
use crate::theme::ZoomfolderTheme;
use crate::widgets;

pub const DEFAULT_WIDTH: f32 = 1280.0;
pub const DEFAULT_HEIGHT: f32 = 720.0;

/// Startup settings handed over by the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    /// Folder to scan as soon as the window opens.
    pub initial_path: Option<PathBuf>,
    pub width: f32,
    pub height: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            initial_path: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl ViewerOptions {
    /// Window settings for `eframe::run_native`.
    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title("Zoomfolder")
                .with_inner_size([self.width, self.height])
                .with_min_inner_size([480.0, 320.0])
                .with_drag_and_drop(true),
            ..Default::default()
        }
    }
}

/// Pre-built application state.
///
/// Construct this before calling `eframe::run_native` so the initial scan is
/// already running when the first frame is drawn.
pub struct ZoomfolderState {
    pub(crate) inner: AppState,
}

impl ZoomfolderState {
    /// Create the state and start scanning the initial folder, if any.
    pub fn build(options: &ViewerOptions) -> Self {
        let mut state = AppState::new();
        if let Some(path) = &options.initial_path {
            state.open_folder(path.clone());
        }
        Self { inner: state }
    }

    pub fn state(&self) -> &AppState {
        &self.inner
    }
}

/// The Zoomfolder application.
pub struct ZoomfolderApp {
    state: AppState,
}

impl ZoomfolderApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: ZoomfolderState) -> Self {
        ZoomfolderTheme::for_mode(state.inner.dark_mode).apply(&cc.egui_ctx);
        Self { state: state.inner }
    }

    /// `Esc` stops a scan, `R` resets the view. Ignored while a text field
    /// has keyboard focus.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (escape, reset) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::R),
            )
        });
        if escape {
            self.state.cancel_scan();
        }
        if reset && self.state.phase != AppPhase::Welcome {
            self.state.reset_view();
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            tracing::info!("Folder dropped: {}", path.display());
            self.state.open_folder(path);
        }
    }
}

impl eframe::App for ZoomfolderApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        let theme = ZoomfolderTheme::for_mode(self.state.dark_mode);
        theme.apply(ctx);

        // ── Input and background state ────────────────────────────────────
        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);
        self.state.process_scan_events();

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state, &theme);
                ui.add_space(2.0);
            });

        // ── Central panel (icicle) ────────────────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if self.state.phase == AppPhase::Welcome {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(
                                "Open a folder to begin\n\
                                 Type a path above, pass one on the command line, or drop a folder here",
                            )
                            .size(14.0)
                            .color(theme.text_muted),
                        );
                    });
                } else {
                    widgets::icicle::icicle(ui, &mut self.state, &theme);
                }
            });

        if self.state.needs_repaint() {
            ctx.request_repaint();
        }
    }
}
