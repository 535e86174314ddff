//! Color constants and the intensity color scale.
//!
//! The viewer keeps the original's retro terminal look: black background,
//! phosphor-green chrome, hotspots colored by the intensity scale.

use eframe::egui::Color32;

/// One step of the intensity color scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityLevel {
    /// Lowest intensity at which this level applies.
    pub threshold: f64,
    pub color: Color32,
    pub label: &'static str,
}

/// The intensity scale, thresholds strictly increasing.
///
/// An intensity maps to the highest-threshold entry not exceeding it.
pub static INTENSITY_SCALE: [IntensityLevel; 6] = [
    IntensityLevel { threshold: 0.0, color: Color32::from_rgb(0x00, 0x11, 0x00), label: "Minimal" },
    IntensityLevel { threshold: 20.0, color: Color32::from_rgb(0x00, 0x33, 0x00), label: "Light" },
    IntensityLevel { threshold: 40.0, color: Color32::from_rgb(0x00, 0xff, 0x00), label: "Moderate" },
    IntensityLevel { threshold: 60.0, color: Color32::from_rgb(0xff, 0xff, 0x00), label: "Heavy" },
    IntensityLevel { threshold: 80.0, color: Color32::from_rgb(0xff, 0x66, 0x00), label: "Extreme" },
    IntensityLevel { threshold: 95.0, color: Color32::from_rgb(0xff, 0x00, 0x00), label: "Epic" },
];

/// Looks up the scale entry for an intensity value.
///
/// Ordered-table lookup: the last entry whose threshold is `<= intensity`.
/// Total over any finite input; values below the first threshold map to
/// the first entry.
pub fn level_for_intensity(intensity: f64) -> &'static IntensityLevel {
    let index = INTENSITY_SCALE
        .partition_point(|level| level.threshold <= intensity)
        .saturating_sub(1);
    &INTENSITY_SCALE[index]
}

/// General chrome colors for the terminal look.
pub mod ui {
    use super::Color32;

    /// Canvas and panel background.
    pub const BACKGROUND: Color32 = Color32::from_rgb(0, 0, 0);
    /// Primary phosphor green.
    pub const ACCENT: Color32 = Color32::from_rgb(0, 255, 0);
    /// Dim green for secondary text.
    pub const DIM: Color32 = Color32::from_rgb(0, 136, 0);
    /// Muted green for separators and the globe sphere outline.
    pub const FRAME: Color32 = Color32::from_rgb(0, 51, 0);
    /// Error red for the fatal map-load screen.
    pub const ERROR: Color32 = Color32::from_rgb(255, 60, 60);

    /// Country boundary stroke - needs alpha, use function.
    pub fn boundary() -> Color32 {
        Color32::from_rgba_unmultiplied(0, 255, 0, 110)
    }

    /// Globe sphere outline - needs alpha, use function.
    pub fn sphere() -> Color32 {
        Color32::from_rgba_unmultiplied(0, 255, 0, 80)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total_over_the_intensity_range() {
        let mut value = 0.0;
        while value <= 100.0 {
            let _ = level_for_intensity(value);
            value += 0.1;
        }
    }

    #[test]
    fn boundaries_select_the_entry_at_the_threshold() {
        assert_eq!(level_for_intensity(0.0).label, "Minimal");
        assert_eq!(level_for_intensity(19.9).label, "Minimal");
        assert_eq!(level_for_intensity(20.0).label, "Light");
        assert_eq!(level_for_intensity(40.0).label, "Moderate");
        assert_eq!(level_for_intensity(59.9).label, "Moderate");
        assert_eq!(level_for_intensity(60.0).label, "Heavy");
        assert_eq!(level_for_intensity(94.9).label, "Extreme");
        assert_eq!(level_for_intensity(95.0).label, "Epic");
        assert_eq!(level_for_intensity(100.0).label, "Epic");
    }

    #[test]
    fn severity_is_monotonic_in_intensity() {
        let index_of = |intensity: f64| {
            INTENSITY_SCALE
                .iter()
                .position(|l| std::ptr::eq(l, level_for_intensity(intensity)))
                .unwrap()
        };
        let mut last = 0;
        for step in 0..=1000 {
            let index = index_of(step as f64 / 10.0);
            assert!(index >= last, "severity regressed at {}", step as f64 / 10.0);
            last = index;
        }
    }

    #[test]
    fn out_of_range_values_clamp_to_the_scale_ends() {
        // The aggregator clamps to [0, 100], but the lookup stays total
        // for anything finite.
        assert_eq!(level_for_intensity(-5.0).label, "Minimal");
        assert_eq!(level_for_intensity(250.0).label, "Epic");
    }

    #[test]
    fn thresholds_are_strictly_increasing() {
        for pair in INTENSITY_SCALE.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }
}
