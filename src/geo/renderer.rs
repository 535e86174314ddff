//! Boundary rendering.
//!
//! Draws world outlines to the egui canvas under the active projection.

use eframe::egui::{Painter, Pos2, Stroke};
use geo_types::Coord;

use super::layer::WorldMap;
use super::projection::MapProjection;

/// Renders every boundary outline of the world map.
pub fn render_world(painter: &Painter, world: &WorldMap, projection: &MapProjection, stroke: Stroke) {
    for outline in &world.outlines {
        render_outline(painter, outline, projection, stroke);
    }
}

/// Renders one outline as line segments.
///
/// In globe mode a segment is dropped when either endpoint is on the far
/// hemisphere, which also prevents front/back mirror artifacts across the
/// limb.
fn render_outline(
    painter: &Painter,
    coords: &[Coord<f64>],
    projection: &MapProjection,
    stroke: Stroke,
) {
    if coords.len() < 2 {
        return;
    }

    let screen_points: Vec<Option<Pos2>> = coords.iter().map(|c| projection.project(*c)).collect();

    for window in screen_points.windows(2) {
        if let [Some(p1), Some(p2)] = window {
            // Skip sub-pixel segments
            let dist_sq = (p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2);
            if dist_sq > 0.5 {
                painter.line_segment([*p1, *p2], stroke);
            }
        }
    }
}
