//! Bottom status bar -- scan progress and statistics.
use crate::state::{AppPhase, AppState};
use crate::theme::ZoomfolderTheme;
use egui::Ui;
use zoomfolder_core::model::size::{format_count, format_size};

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState, theme: &ZoomfolderTheme) {
    let snap = &state.snapshot;

    ui.horizontal(|ui| {
        if let Some(err) = &state.last_error {
            ui.label(egui::RichText::new(err).size(12.0).color(theme.warning));
            ui.separator();
        }

        match state.phase {
            AppPhase::Welcome => {
                ui.label(
                    egui::RichText::new("Ready")
                        .size(12.0)
                        .color(theme.text_muted),
                );
            }
            AppPhase::Scanning => {
                ui.spinner();
                ui.label(
                    egui::RichText::new(format!(
                        "Scanning {}",
                        truncate_path(&state.path_input, 60)
                    ))
                    .size(12.0)
                    .color(theme.text_primary),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format!(
                        "{} files",
                        format_count(u64::from(snap.total_files))
                    ))
                    .size(12.0)
                    .color(theme.text_primary),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format_size(snap.total_size))
                        .size(12.0)
                        .color(theme.accent),
                );
            }
            AppPhase::Viewing => {
                let (status_text, status_color) = if state.scan_was_cancelled {
                    ("\u{23f9} Scan stopped (partial results)", theme.warning)
                } else {
                    ("\u{2713} Scan complete", theme.success)
                };
                ui.label(
                    egui::RichText::new(status_text)
                        .size(12.0)
                        .color(status_color),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format!(
                        "{} files",
                        format_count(u64::from(snap.total_files))
                    ))
                    .size(12.0)
                    .color(theme.text_primary),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format_size(snap.total_size))
                        .size(12.0)
                        .color(theme.accent),
                );

                if let Some(duration) = state.scan_duration {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("{:.1}s", duration.as_secs_f64()))
                            .size(12.0)
                            .color(theme.text_muted),
                    );
                }
            }
        }

        if snap.skipped > 0 {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{} skipped", format_count(snap.skipped)))
                    .size(12.0)
                    .color(theme.warning),
            );
        }
    });
}

/// Truncate a path string to at most `max_len` characters,
/// replacing the middle with "..." if needed.
fn truncate_path(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len {
        return path.to_string();
    }
    let half = max_len.saturating_sub(3) / 2;
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    format!("{head}...{tail}")
}
