//! Visualization state: view mode, zoom, and rotation center.

use eframe::egui::Vec2;

/// Initial zoom applied at startup and on view reset.
pub const INITIAL_ZOOM: f32 = 1.2;

/// Zoom extent.
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 5.0;

/// Drag sensitivity: degrees of rotation per pixel is `DRAG_FACTOR /
/// scale`, so rotation feels constant-speed regardless of zoom level.
pub const DRAG_FACTOR: f64 = 75.0;

/// Automatic slow-rotation rate (0.2 degrees/frame at 60 fps).
pub const AUTO_ROTATE_DEG_PER_SEC: f64 = 12.0;

/// Which map presentation is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Rotatable orthographic globe.
    #[default]
    Globe,
    /// Flat equirectangular map.
    Flat,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Globe => "Globe",
            ViewMode::Flat => "Flat",
        }
    }

    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::Globe, ViewMode::Flat]
    }
}

/// View controls for the map canvas.
#[derive(Debug, Clone)]
pub struct VizState {
    pub mode: ViewMode,
    /// Current zoom level (1.0 = globe radius `min(w,h)/2.2`).
    pub zoom: f32,
    /// Longitude at the screen center, degrees.
    pub center_lon: f64,
    /// Latitude at the screen center, degrees.
    pub center_lat: f64,
}

impl Default for VizState {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            zoom: INITIAL_ZOOM,
            center_lon: 0.0,
            center_lat: 0.0,
        }
    }
}

impl VizState {
    /// Applies a drag delta (pixels) as a rotation, inversely scaled by
    /// the globe's current pixel radius.
    pub fn apply_drag(&mut self, delta: Vec2, scale: f64) {
        if scale <= 0.0 {
            return;
        }
        let k = DRAG_FACTOR / scale;
        self.center_lon = wrap_longitude(self.center_lon - delta.x as f64 * k);
        self.center_lat = (self.center_lat + delta.y as f64 * k).clamp(-90.0, 90.0);
    }

    /// Applies a multiplicative zoom step, clamped to the zoom extent.
    pub fn apply_zoom(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Restores the startup view: rotation [0, 0] at the initial zoom.
    pub fn reset_view(&mut self) {
        self.zoom = INITIAL_ZOOM;
        self.center_lon = 0.0;
        self.center_lat = 0.0;
    }

    /// Advances the slow automatic rotation by one frame.
    pub fn step_auto_rotation(&mut self, dt_secs: f64) {
        self.center_lon = wrap_longitude(self.center_lon - AUTO_ROTATE_DEG_PER_SEC * dt_secs);
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    let mut wrapped = (lon + 180.0) % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    wrapped - 180.0
}
