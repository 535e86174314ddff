//! Map projections and coordinate transformation.
//!
//! Converts geographic coordinates (lon/lat) to screen positions under the
//! two supported views: an orthographic globe and a flat equirectangular
//! map. Everything here is pure geometry so it can be tested without a UI.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;
use glam::DVec3;

/// A zoom of 1.0 fits a globe of radius `min(w, h) / 2.2` pixels.
pub const BASE_SCALE_DIVISOR: f32 = 2.2;

/// Natural width/height ratio of the equirectangular world map.
pub const FLAT_MAP_ASPECT: f32 = 2.0;

/// Orthographic "globe" projection.
///
/// The view is described by the geographic point at the screen center and
/// the globe's pixel radius. A point on the far hemisphere (great-circle
/// distance from the view center >= 90 degrees) is not visible.
#[derive(Debug, Clone)]
pub struct GlobeProjection {
    /// Longitude at the screen center, degrees.
    pub center_lon: f64,
    /// Latitude at the screen center, degrees.
    pub center_lat: f64,
    /// Globe radius in pixels.
    pub scale: f64,
    /// Screen rectangle of the canvas.
    pub screen_rect: Rect,
}

impl GlobeProjection {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f32, screen_rect: Rect) -> Self {
        Self {
            center_lon,
            center_lat,
            scale: (base_scale(screen_rect) * zoom) as f64,
            screen_rect,
        }
    }

    /// Projects a coordinate to screen space.
    ///
    /// The forward orthographic projection is defined for back-facing
    /// points too (they mirror onto the disk), so callers must gate
    /// rendering on [`GlobeProjection::is_visible`].
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let lam = (coord.x - self.center_lon).to_radians();
        let phi = coord.y.to_radians();
        let phi0 = self.center_lat.to_radians();

        let x = self.scale * phi.cos() * lam.sin();
        let y = self.scale * (phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * lam.cos());

        let center = self.screen_rect.center();
        // Screen y grows downward
        Pos2::new(center.x + x as f32, center.y - y as f32)
    }

    /// Whether a point is on the front of the globe.
    ///
    /// Points on the terminator (exactly 90 degrees out) count as hidden.
    pub fn is_visible(&self, coord: Coord<f64>) -> bool {
        let center = unit_vector(self.center_lon, self.center_lat);
        unit_vector(coord.x, coord.y).dot(center) > f64::EPSILON
    }
}

/// Flat equirectangular projection into a letterboxed map rectangle.
///
/// Longitude [-180, 180] maps linearly onto the rectangle's width and
/// latitude [90, -90] onto its height.
#[derive(Debug, Clone)]
pub struct FlatProjection {
    /// The drawn map's bounding box within the canvas.
    pub map_rect: Rect,
}

impl FlatProjection {
    /// Letterboxes the 2:1 world map inside the canvas, preserving the
    /// map's aspect ratio.
    pub fn fit(screen_rect: Rect) -> Self {
        let canvas_aspect = screen_rect.width() / screen_rect.height();

        let size = if canvas_aspect > FLAT_MAP_ASPECT {
            // Canvas is wider than the map: full height, centered width
            Vec2::new(screen_rect.height() * FLAT_MAP_ASPECT, screen_rect.height())
        } else {
            Vec2::new(screen_rect.width(), screen_rect.width() / FLAT_MAP_ASPECT)
        };

        Self {
            map_rect: Rect::from_center_size(screen_rect.center(), size),
        }
    }

    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let normalized_x = ((coord.x + 180.0) / 360.0) as f32;
        let normalized_y = ((90.0 - coord.y) / 180.0) as f32;

        Pos2::new(
            self.map_rect.left() + normalized_x * self.map_rect.width(),
            self.map_rect.top() + normalized_y * self.map_rect.height(),
        )
    }
}

/// The active projection for the current view mode.
#[derive(Debug, Clone)]
pub enum MapProjection {
    Globe(GlobeProjection),
    Flat(FlatProjection),
}

impl MapProjection {
    /// Projects a coordinate, or `None` when it is not visible under the
    /// current view (the far hemisphere in globe mode).
    pub fn project(&self, coord: Coord<f64>) -> Option<Pos2> {
        match self {
            MapProjection::Globe(globe) => {
                globe.is_visible(coord).then(|| globe.geo_to_screen(coord))
            }
            MapProjection::Flat(flat) => Some(flat.geo_to_screen(coord)),
        }
    }

    /// Hotspot core dot radius for an intensity value.
    pub fn core_radius(&self, intensity: f64) -> f32 {
        match self {
            MapProjection::Globe(_) => 4.0 + (intensity / 20.0) as f32,
            MapProjection::Flat(_) => 6.0 + (intensity / 15.0) as f32,
        }
    }

    /// Hotspot glow halo radius for an intensity value.
    pub fn glow_radius(&self, intensity: f64) -> f32 {
        match self {
            MapProjection::Globe(_) => 30.0 + (intensity / 4.0) as f32,
            MapProjection::Flat(_) => self.core_radius(intensity) * 3.0,
        }
    }

    /// Pointer hit radius for an intensity value. Hotter spots are easier
    /// to hit.
    pub fn hit_radius(&self, intensity: f64) -> f32 {
        match self {
            MapProjection::Globe(_) => self.core_radius(intensity) + 6.0,
            MapProjection::Flat(_) => 15.0 + (intensity / 10.0) as f32,
        }
    }
}

/// Unit vector on the sphere for a lon/lat pair in degrees.
pub fn unit_vector(lon_deg: f64, lat_deg: f64) -> DVec3 {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Great-circle angular distance between two coordinates, in radians.
pub fn angular_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    unit_vector(a.x, a.y)
        .dot(unit_vector(b.x, b.y))
        .clamp(-1.0, 1.0)
        .acos()
}

/// Nearest hotspot under the pointer, if any is within its hit radius.
///
/// `spots` yields `(coordinate, intensity)` pairs; the returned index
/// refers to the iteration order.
pub fn hit_test<I>(projection: &MapProjection, pointer: Pos2, spots: I) -> Option<usize>
where
    I: IntoIterator<Item = (Coord<f64>, f64)>,
{
    let mut best: Option<(usize, f32)> = None;
    for (index, (coord, intensity)) in spots.into_iter().enumerate() {
        let Some(pos) = projection.project(coord) else {
            continue;
        };
        let distance = pos.distance(pointer);
        if distance < projection.hit_radius(intensity) && best.map_or(true, |(_, d)| distance < d)
        {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

fn base_scale(rect: Rect) -> f32 {
    rect.width().min(rect.height()) / BASE_SCALE_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    fn coord(lon: f64, lat: f64) -> Coord<f64> {
        Coord { x: lon, y: lat }
    }

    #[test]
    fn view_center_projects_to_screen_center() {
        let globe = GlobeProjection::new(0.0, 0.0, 1.0, canvas());
        let pos = globe.geo_to_screen(coord(0.0, 0.0));
        assert_eq!(pos, canvas().center());
        assert!(globe.is_visible(coord(0.0, 0.0)));
    }

    #[test]
    fn antipode_is_not_visible() {
        let globe = GlobeProjection::new(0.0, 0.0, 1.0, canvas());
        assert!(!globe.is_visible(coord(180.0, 0.0)));

        let projection = MapProjection::Globe(globe);
        assert!(projection.project(coord(180.0, 0.0)).is_none());
        assert!(projection.project(coord(0.0, 0.0)).is_some());
    }

    #[test]
    fn front_hemisphere_orientation() {
        let globe = GlobeProjection::new(0.0, 0.0, 1.0, canvas());
        let center = canvas().center();

        // East of center lands to the right, north lands above.
        let east = globe.geo_to_screen(coord(10.0, 0.0));
        assert!(east.x > center.x);
        assert!((east.y - center.y).abs() < 1e-3);

        let north = globe.geo_to_screen(coord(0.0, 45.0));
        assert!(north.y < center.y);
    }

    #[test]
    fn visibility_boundary_is_ninety_degrees() {
        let globe = GlobeProjection::new(0.0, 0.0, 1.0, canvas());
        assert!(globe.is_visible(coord(89.9, 0.0)));
        assert!(!globe.is_visible(coord(90.0, 0.0)));
        assert!(!globe.is_visible(coord(90.1, 0.0)));
    }

    #[test]
    fn rotation_recenters_the_view() {
        // Center the view on Niseko; it must project to the screen center
        // and Colorado must fall off the visible hemisphere.
        let globe = GlobeProjection::new(140.6869, 42.8048, 1.0, canvas());
        let pos = globe.geo_to_screen(coord(140.6869, 42.8048));
        assert!((pos.x - canvas().center().x).abs() < 1e-3);
        assert!((pos.y - canvas().center().y).abs() < 1e-3);
        assert!(!globe.is_visible(coord(-106.37, 39.64)));
    }

    #[test]
    fn zoom_scales_the_globe_radius() {
        let near = GlobeProjection::new(0.0, 0.0, 2.0, canvas());
        let far = GlobeProjection::new(0.0, 0.0, 1.0, canvas());
        assert_eq!(near.scale, far.scale * 2.0);

        let center_x = canvas().center().x;
        let near_east = near.geo_to_screen(coord(10.0, 0.0));
        let far_east = far.geo_to_screen(coord(10.0, 0.0));
        assert!(near_east.x - center_x > far_east.x - center_x);
    }

    #[test]
    fn flat_corners_map_to_map_rect_corners() {
        let flat = FlatProjection::fit(canvas());
        let rect = flat.map_rect;

        assert_eq!(flat.geo_to_screen(coord(-180.0, 90.0)), rect.left_top());
        assert_eq!(flat.geo_to_screen(coord(180.0, -90.0)), rect.right_bottom());
        assert_eq!(flat.geo_to_screen(coord(0.0, 0.0)), rect.center());
    }

    #[test]
    fn letterbox_preserves_map_aspect() {
        // Wider than 2:1: full height, horizontal margins
        let wide = FlatProjection::fit(Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(1000.0, 400.0),
        ));
        assert_eq!(wide.map_rect.height(), 400.0);
        assert_eq!(wide.map_rect.width(), 800.0);
        assert_eq!(wide.map_rect.left(), 100.0);

        // Taller than 2:1: full width, vertical margins
        let tall = FlatProjection::fit(Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(400.0, 1000.0),
        ));
        assert_eq!(tall.map_rect.width(), 400.0);
        assert_eq!(tall.map_rect.height(), 200.0);
        assert_eq!(tall.map_rect.top(), 400.0);
    }

    #[test]
    fn hit_test_picks_the_nearest_spot_within_radius() {
        let projection = MapProjection::Flat(FlatProjection::fit(canvas()));
        let spots = vec![
            (coord(0.0, 0.0), 0.0),
            (coord(2.0, 0.0), 0.0),
            (coord(120.0, 45.0), 100.0),
        ];

        // Pointer just east of the origin spot: both origin-adjacent spots
        // are within radius; the closer one wins.
        let near_origin = projection.project(coord(0.5, 0.0)).unwrap();
        assert_eq!(hit_test(&projection, near_origin, spots.clone()), Some(0));

        // Far from everything: no hit.
        let empty_ocean = projection.project(coord(-40.0, -40.0)).unwrap();
        assert_eq!(hit_test(&projection, empty_ocean, spots.clone()), None);
    }

    #[test]
    fn hit_test_ignores_back_facing_spots() {
        let globe = GlobeProjection::new(0.0, 0.0, 1.0, canvas());
        let projection = MapProjection::Globe(globe);
        // A hidden spot that would otherwise mirror onto the screen center.
        let spots = vec![(coord(180.0, 0.0), 100.0)];
        assert_eq!(hit_test(&projection, canvas().center(), spots), None);
    }

    #[test]
    fn radius_policies_grow_with_intensity() {
        let globe = MapProjection::Globe(GlobeProjection::new(0.0, 0.0, 1.0, canvas()));
        let flat = MapProjection::Flat(FlatProjection::fit(canvas()));

        assert_eq!(globe.core_radius(0.0), 4.0);
        assert_eq!(globe.core_radius(100.0), 9.0);
        assert_eq!(globe.glow_radius(100.0), 55.0);
        assert_eq!(flat.core_radius(0.0), 6.0);
        assert_eq!(flat.hit_radius(0.0), 15.0);
        assert_eq!(flat.hit_radius(100.0), 25.0);
    }

    #[test]
    fn angular_distance_examples() {
        let quarter = angular_distance(coord(0.0, 0.0), coord(90.0, 0.0));
        assert!((quarter - std::f64::consts::FRAC_PI_2).abs() < 1e-9);

        let half = angular_distance(coord(0.0, 0.0), coord(180.0, 0.0));
        assert!((half - std::f64::consts::PI).abs() < 1e-9);

        assert_eq!(angular_distance(coord(45.0, 45.0), coord(45.0, 45.0)), 0.0);
    }
}
