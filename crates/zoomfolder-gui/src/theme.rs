//! Colour scheme for Zoomfolder.
//!
//! Chrome colours live in [`ZoomfolderTheme`]; row colours come from a fixed
//! palette keyed by a hash of the directory name, so a folder keeps its
//! colour across scans and zoom levels.
use egui::{Color32, Stroke, Visuals};

/// Row fill colours.
pub const PALETTE: [Color32; 16] = [
    Color32::from_rgb(0, 188, 176),
    Color32::from_rgb(255, 87, 80),
    Color32::from_rgb(30, 136, 229),
    Color32::from_rgb(255, 179, 0),
    Color32::from_rgb(126, 87, 194),
    Color32::from_rgb(124, 179, 66),
    Color32::from_rgb(236, 64, 122),
    Color32::from_rgb(0, 229, 255),
    Color32::from_rgb(255, 109, 0),
    Color32::from_rgb(16, 185, 129),
    Color32::from_rgb(213, 0, 143),
    Color32::from_rgb(255, 196, 0),
    Color32::from_rgb(63, 81, 181),
    Color32::from_rgb(192, 220, 42),
    Color32::from_rgb(244, 67, 131),
    Color32::from_rgb(56, 189, 248),
];

/// Added to each channel of the hovered row.
const HOVER_BOOST: u8 = 30;

/// djb2 variant with xor mixing, over the bytes of the name.
pub fn hash_name(name: &str) -> u32 {
    name.bytes()
        .fold(5381u32, |h, b| (h << 5).wrapping_add(h) ^ u32::from(b))
}

/// Fill colour for a row named `name`.
pub fn row_color(name: &str) -> Color32 {
    PALETTE[hash_name(name) as usize % PALETTE.len()]
}

/// Brightened fill for the hovered row.
pub fn hover_color(c: Color32) -> Color32 {
    Color32::from_rgb(
        c.r().saturating_add(HOVER_BOOST),
        c.g().saturating_add(HOVER_BOOST),
        c.b().saturating_add(HOVER_BOOST),
    )
}

/// Outline for a non-hovered row: the fill at half intensity.
pub fn outline_color(c: Color32) -> Color32 {
    Color32::from_rgb(c.r() / 2, c.g() / 2, c.b() / 2)
}

/// Semantic colour palette for the window chrome and canvas.
pub struct ZoomfolderTheme {
    pub background_top: Color32,
    pub background_bottom: Color32,
    pub grid_dot: Color32,
    pub surface: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub warning: Color32,
    pub success: Color32,
    pub label: Color32,
    pub hover_outline: Color32,
    pub separator: Color32,
}

impl ZoomfolderTheme {
    pub fn dark() -> Self {
        Self {
            background_top: Color32::from_rgb(42, 42, 66),
            background_bottom: Color32::from_rgb(28, 28, 38),
            grid_dot: Color32::from_rgba_unmultiplied(255, 255, 255, 28),
            surface: Color32::from_rgb(0x2a, 0x2a, 0x3c),
            text_primary: Color32::from_rgb(0xe4, 0xe4, 0xe8),
            text_muted: Color32::from_rgb(180, 180, 180),
            accent: Color32::from_rgb(0x89, 0xb4, 0xfa),
            warning: Color32::from_rgb(0xfa, 0xb3, 0x87),
            success: Color32::from_rgb(0xa6, 0xe3, 0xa1),
            label: Color32::from_rgb(20, 20, 20),
            hover_outline: Color32::from_rgb(200, 200, 210),
            separator: Color32::from_rgb(0x3a, 0x3a, 0x50),
        }
    }

    pub fn light() -> Self {
        Self {
            background_top: Color32::from_rgb(0xf5, 0xf5, 0xf8),
            background_bottom: Color32::from_rgb(0xe0, 0xe0, 0xe8),
            grid_dot: Color32::from_rgba_unmultiplied(0, 0, 0, 28),
            surface: Color32::from_rgb(0xff, 0xff, 0xff),
            text_primary: Color32::from_rgb(0x1e, 0x1e, 0x2e),
            text_muted: Color32::from_rgb(0x6a, 0x6a, 0x7a),
            accent: Color32::from_rgb(0x3a, 0x6f, 0xd8),
            warning: Color32::from_rgb(0xd0, 0x80, 0x20),
            success: Color32::from_rgb(0x30, 0x98, 0x30),
            label: Color32::from_rgb(20, 20, 20),
            hover_outline: Color32::from_rgb(40, 40, 50),
            separator: Color32::from_rgb(0xd0, 0xd0, 0xd8),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Apply the chrome colours to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.background_bottom.r() < 128 {
            Visuals::dark()
        } else {
            Visuals::light()
        };
        visuals.panel_fill = self.background_bottom;
        visuals.window_fill = self.surface;
        visuals.extreme_bg_color = self.background_bottom;
        visuals.hyperlink_color = self.accent;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.window_stroke = Stroke::new(1.0, self.separator);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_primary);
        ctx.set_visuals(visuals);
    }
}
