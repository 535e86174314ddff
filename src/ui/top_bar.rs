//! Top bar UI: title, view controls, refresh, and the update countdown.

use chrono::Utc;
use eframe::egui::{self, RichText};

use super::colors;
use crate::state::{AppState, ViewMode};

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new("SNOWDAR")
                        .strong()
                        .monospace()
                        .size(16.0)
                        .color(colors::ui::ACCENT),
                );

                ui.separator();

                // View mode toggle
                for mode in ViewMode::all() {
                    if ui
                        .selectable_label(state.viz.mode == *mode, mode.label())
                        .clicked()
                    {
                        state.viz.mode = *mode;
                        state.hovered = None;
                    }
                }

                ui.separator();

                if ui.button("Reset View").clicked() {
                    state.viz.reset_view();
                    state.interaction.resume_now();
                }

                let refresh = ui.add_enabled(
                    !state.fetch_in_progress,
                    egui::Button::new("Refresh Now"),
                );
                if refresh.clicked() {
                    state.refresh_requested = true;
                }

                ui.separator();

                ui.label(
                    RichText::new(format!("NEXT UPDATE {}", state.countdown_label(Utc::now())))
                        .monospace()
                        .size(12.0)
                        .color(colors::ui::DIM),
                );

                ui.separator();

                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(colors::ui::DIM),
                );
            });
        });
}
