//! Central canvas: the world map and its snowfall hotspots.

use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, RichText, Sense, Stroke, Vec2};
use geo_types::Coord;

use super::colors::{self, level_for_intensity};
use crate::geo::{hit_test, render_world, FlatProjection, GlobeProjection, MapProjection, WorldMap};
use crate::snow::ResortSnapshot;
use crate::state::{AppState, InteractionPhase, ViewMode};

/// Renders the map canvas and handles its interactions.
pub fn render_canvas(ctx: &egui::Context, state: &mut AppState, world: &WorldMap) {
    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(colors::ui::BACKGROUND))
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;

            painter.rect_filled(rect, 0.0, colors::ui::BACKGROUND);

            let projection = build_projection(state, rect);

            // Globe outline behind everything else
            if let MapProjection::Globe(ref globe) = projection {
                painter.circle_stroke(
                    rect.center(),
                    globe.scale as f32,
                    Stroke::new(2.0, colors::ui::sphere()),
                );
            }

            render_world(
                &painter,
                world,
                &projection,
                Stroke::new(1.0, colors::ui::boundary()),
            );

            let time = ctx.input(|i| i.time);
            render_hotspots(&painter, state, &projection, time);

            draw_overlay_info(&painter, &rect, state);

            handle_canvas_interaction(ctx, &response, state, &projection);

            if let Some(index) = state.hovered {
                if let Some(snapshot) = state.snapshots.regions.get(index) {
                    if let Some(pointer) = response.hover_pos() {
                        show_tooltip(ctx, pointer, snapshot);
                    }
                }
            }
        });
}

fn build_projection(state: &AppState, rect: Rect) -> MapProjection {
    match state.viz.mode {
        ViewMode::Globe => MapProjection::Globe(GlobeProjection::new(
            state.viz.center_lon,
            state.viz.center_lat,
            state.viz.zoom,
            rect,
        )),
        ViewMode::Flat => MapProjection::Flat(FlatProjection::fit(rect)),
    }
}

fn snapshot_coord(snapshot: &ResortSnapshot) -> Coord<f64> {
    Coord {
        x: snapshot.coords[0],
        y: snapshot.coords[1],
    }
}

fn render_hotspots(painter: &Painter, state: &AppState, projection: &MapProjection, time: f64) {
    // Hovered hotspot draws last so it sits on top.
    for (index, snapshot) in state.snapshots.regions.iter().enumerate() {
        if state.hovered != Some(index) {
            draw_hotspot(painter, state, projection, snapshot, time, false);
        }
    }
    if let Some(index) = state.hovered {
        if let Some(snapshot) = state.snapshots.regions.get(index) {
            draw_hotspot(painter, state, projection, snapshot, time, true);
        }
    }
}

fn draw_hotspot(
    painter: &Painter,
    state: &AppState,
    projection: &MapProjection,
    snapshot: &ResortSnapshot,
    time: f64,
    hovered: bool,
) {
    let Some(pos) = projection.project(snapshot_coord(snapshot)) else {
        return;
    };

    let color = level_for_intensity(snapshot.intensity).color;

    // Subtle pulse, phase-shifted by intensity so spots don't beat in sync
    let pulse = ((time * 1.5 + snapshot.intensity).sin() * 0.15 + 1.0) as f32;
    let core = projection.core_radius(snapshot.intensity) * pulse * if hovered { 1.4 } else { 1.0 };
    let glow = projection.glow_radius(snapshot.intensity) * pulse;

    // Layered circles stand in for a radial gradient
    for (fraction, alpha) in [(1.0, 28), (0.6, 60), (0.3, 110)] {
        painter.circle_filled(pos, glow * fraction, with_alpha(color, alpha));
    }

    painter.circle_filled(pos, core, color);
    painter.circle_stroke(
        pos,
        core,
        Stroke::new(
            if hovered { 1.5 } else { 0.5 },
            if hovered {
                colors::ui::ACCENT
            } else {
                Color32::BLACK
            },
        ),
    );

    if hovered {
        painter.circle_stroke(pos, core + 8.0, Stroke::new(2.0, colors::ui::ACCENT));
    }

    // Labels for the loud spots, or once zoomed in far enough
    if hovered || snapshot.intensity > 60.0 || state.viz.zoom > 1.5 {
        let short_name = snapshot.name.split(" - ").next().unwrap_or(snapshot.name.as_str());
        painter.text(
            pos + Vec2::new(0.0, -(core + 6.0)),
            Align2::CENTER_BOTTOM,
            short_name,
            FontId::proportional(10.0),
            colors::ui::ACCENT,
        );
    }
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn handle_canvas_interaction(
    ctx: &egui::Context,
    response: &egui::Response,
    state: &mut AppState,
    projection: &MapProjection,
) {
    let now = ctx.input(|i| i.time);

    // Dragging rotates the globe; the flat map is fixed.
    if response.drag_started() {
        state.interaction.begin_drag();
        state.hovered = None;
    }
    if response.dragged() {
        if let MapProjection::Globe(globe) = projection {
            state.viz.apply_drag(response.drag_delta(), globe.scale);
        }
    }
    if response.drag_stopped() {
        state.interaction.end_drag(now);
    }

    // Scroll zooms (globe mode), relative steps clamped to the extent
    if response.hovered() {
        let scroll = ctx.input(|i| i.raw_scroll_delta);
        if scroll.y != 0.0 && matches!(projection, MapProjection::Globe(_)) {
            if state.interaction.phase != InteractionPhase::Zooming {
                state.interaction.begin_zoom();
                state.hovered = None;
            }
            state.viz.apply_zoom(1.0 + scroll.y * 0.001);
        } else if state.interaction.phase == InteractionPhase::Zooming {
            state.interaction.end_zoom(now);
        }
    } else if state.interaction.phase == InteractionPhase::Zooming {
        state.interaction.end_zoom(now);
    }

    // Hover hit-testing (not while mid-gesture)
    if state.interaction.phase == InteractionPhase::Idle {
        let previously_hovered = state.hovered;
        state.hovered = response.hover_pos().and_then(|pointer| {
            hit_test(
                projection,
                pointer,
                state
                    .snapshots
                    .regions
                    .iter()
                    .map(|s| (snapshot_coord(s), s.intensity)),
            )
        });

        // Hovering holds the rotation still; leaving restarts the timer.
        if state.hovered.is_some() && previously_hovered.is_none() {
            state.interaction.tooltip_entered();
        } else if state.hovered.is_none() && previously_hovered.is_some() {
            state.interaction.tooltip_left(now);
        }
    }

    if response.clicked() {
        if let Some(snapshot) = state.hovered.and_then(|i| state.snapshots.regions.get(i)) {
            log::info!("Clicked resort: {}", snapshot.name);
        }
    }
}

fn show_tooltip(ctx: &egui::Context, pointer: Pos2, snapshot: &ResortSnapshot) {
    let level = level_for_intensity(snapshot.intensity);

    egui::Area::new(egui::Id::new("hotspot_tooltip"))
        .fixed_pos(pointer + Vec2::new(15.0, 15.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(colors::ui::BACKGROUND)
                .stroke(Stroke::new(1.0, colors::ui::ACCENT))
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(&snapshot.name)
                            .monospace()
                            .strong()
                            .color(colors::ui::ACCENT),
                    );
                    tooltip_row(ui, "90d Total:", format!("{}\"", snapshot.snow_90d));
                    tooltip_row(ui, "24h Snow:", format!("{}\"", snapshot.new_snow_24h));
                    tooltip_row(ui, "7d Snow:", format!("{}\"", snapshot.new_snow_7d));
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Intensity:").monospace().color(colors::ui::DIM));
                        ui.label(
                            RichText::new(format!("{} ({})", snapshot.intensity, level.label))
                                .monospace()
                                .color(level.color),
                        );
                    });
                    tooltip_row(ui, "Resorts:", snapshot.resort_count.to_string());
                });
        });
}

fn tooltip_row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).monospace().color(colors::ui::DIM));
        ui.label(RichText::new(value).monospace().color(colors::ui::ACCENT));
    });
}

fn draw_overlay_info(painter: &Painter, rect: &Rect, state: &AppState) {
    let font = FontId::monospace(11.0);
    let mut cursor = rect.left_top() + Vec2::new(10.0, 10.0);

    let lines = [
        format!("MODE: {}", state.viz.mode.label()),
        format!(
            "VIEW: {:+07.2} {:+06.2}  x{:.1}",
            state.viz.center_lon, state.viz.center_lat, state.viz.zoom
        ),
        format!("ROTATION: {}", if state.interaction.is_auto_rotating() { "AUTO" } else { "HELD" }),
    ];

    for line in lines {
        painter.text(cursor, Align2::LEFT_TOP, line, font.clone(), colors::ui::DIM);
        cursor.y += 14.0;
    }
}
