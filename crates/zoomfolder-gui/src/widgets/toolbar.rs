//! Top action bar -- folder path field, open/stop/reset controls and theme toggle.
use crate::state::{AppPhase, AppState};
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("Zoomfolder")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        let field = ui.add(
            egui::TextEdit::singleline(&mut state.path_input)
                .hint_text("Folder path")
                .desired_width(360.0),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let open_btn = ui.add(egui::Button::new("Open").min_size(egui::vec2(70.0, 28.0)));
        if open_btn.clicked() || submitted {
            state.open_path_input();
        }

        // Stop button (only during scan).
        let can_stop = state.phase == AppPhase::Scanning;
        let stop_btn = ui.add_enabled(
            can_stop,
            egui::Button::new("Stop").min_size(egui::vec2(70.0, 28.0)),
        );
        if stop_btn.on_hover_text("Stop scanning (Esc)").clicked() {
            state.cancel_scan();
        }

        let can_reset = state.phase != AppPhase::Welcome;
        if ui
            .add_enabled(can_reset, egui::Button::new("Reset view"))
            .on_hover_text("Zoom back out to the whole folder (R)")
            .clicked()
        {
            state.reset_view();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.toggle_theme();
            }
        });
    });
}
