//! Side panel UI: intensity legend and the resort leaderboard.

use eframe::egui::{self, RichText, ScrollArea};

use super::colors::{self, level_for_intensity, INTENSITY_SCALE};
use crate::state::AppState;

/// How many resorts the leaderboard shows.
const LEADERBOARD_SIZE: usize = 15;

pub fn render_side_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("side_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .max_width(320.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                render_legend_section(ui);
                ui.add_space(5.0);
                render_leaderboard_section(ui, state);
            });
        });
}

fn render_legend_section(ui: &mut egui::Ui) {
    egui::CollapsingHeader::new(RichText::new("Intensity").strong())
        .default_open(true)
        .show(ui, |ui| {
            for level in INTENSITY_SCALE.iter() {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::Vec2::new(12.0, 12.0),
                        egui::Sense::hover(),
                    );
                    ui.painter().rect_filled(rect, 2.0, level.color);
                    ui.label(
                        RichText::new(format!("{} ({}+)", level.label, level.threshold))
                            .monospace()
                            .size(11.0),
                    );
                });
            }
        });
}

fn render_leaderboard_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Deepest Right Now").strong())
        .default_open(true)
        .show(ui, |ui| {
            if state.snapshots.regions.is_empty() {
                ui.label(RichText::new("no data yet").color(colors::ui::DIM));
                return;
            }

            let mut ranked: Vec<usize> = (0..state.snapshots.regions.len()).collect();
            ranked.sort_by(|&a, &b| {
                let (a, b) = (&state.snapshots.regions[a], &state.snapshots.regions[b]);
                b.intensity
                    .partial_cmp(&a.intensity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            for index in ranked.into_iter().take(LEADERBOARD_SIZE) {
                let snapshot = &state.snapshots.regions[index];
                let level = level_for_intensity(snapshot.intensity);
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{:5.1}", snapshot.intensity))
                            .monospace()
                            .color(level.color),
                    );
                    ui.label(RichText::new(&snapshot.name).size(11.0));
                });
            }

            ui.separator();
            ui.label(
                RichText::new(format!("{} resorts tracked", state.snapshots.regions.len()))
                    .small()
                    .color(colors::ui::DIM),
            );
        });
}
