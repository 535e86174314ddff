//! Snowfall aggregation and intensity scoring.
//!
//! Turns a raw daily snowfall series (trailing 90 days, centimeters,
//! most-recent-last) into the display rollups and the 0-100 intensity
//! score. Pure functions only: no I/O, no clock, no logging.

use crate::data::Resort;

/// Conversion factor from centimeters to inches.
pub const CM_TO_INCHES: f64 = 0.3937;

/// Weight applied to the 24h rollup when scoring intensity.
pub const WEIGHT_24H: f64 = 4.0;

/// Weight applied to the 7-day rollup when scoring intensity.
pub const WEIGHT_7D: f64 = 1.2;

/// Minimum intensity guaranteed to resorts in a boosted region.
pub const BOOST_FLOOR: f64 = 20.0;

/// Multiplier applied to the raw score in a boosted region.
pub const BOOST_FACTOR: f64 = 2.0;

/// Region tokens marking legendary powder regions ("Japow factor").
///
/// A resort whose region label contains any of these substrings gets the
/// boosted intensity: `max(BOOST_FLOOR, raw * BOOST_FACTOR)`.
pub const POWDER_REGIONS: &[&str] = &["Hokkaido", "Honshu"];

/// A daily snowfall series as returned by the weather archive: ascending
/// by day, most-recent-last, `None` where the archive reported null.
pub type DailySnowSeries = [Option<f64>];

/// Aggregated rollups and intensity for one resort, in display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnowTotals {
    /// Snowfall over the most recent day, in inches (1 decimal place).
    pub new_snow_24h: f64,
    /// Snowfall over the last 7 days, in whole inches.
    pub new_snow_7d: f64,
    /// Snowfall over the full 90-day window, in whole inches.
    pub snow_90d: f64,
    /// Intensity score in [0, 100], 1 decimal place.
    pub intensity: f64,
}

impl SnowTotals {
    /// The all-zero result substituted when a resort's data is unavailable.
    pub const ZERO: SnowTotals = SnowTotals {
        new_snow_24h: 0.0,
        new_snow_7d: 0.0,
        snow_90d: 0.0,
        intensity: 0.0,
    };
}

/// The snowfall series was empty or absent upstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no snowfall data available")]
pub struct NoDataError;

/// Aggregates a daily snowfall series into rollups and an intensity score.
///
/// The series is in centimeters; rollups are converted to inches. Null
/// entries count as zero. The only failure mode is an empty series, which
/// the caller substitutes with [`SnowTotals::ZERO`].
pub fn aggregate(series: &DailySnowSeries, region: &str) -> Result<SnowTotals, NoDataError> {
    if series.is_empty() {
        return Err(NoDataError);
    }

    let new_snow_24h_cm = series.last().copied().flatten().unwrap_or(0.0);
    let start_7d = series.len().saturating_sub(7);
    let new_snow_7d_cm: f64 = series[start_7d..].iter().flatten().sum();
    let snow_90d_cm: f64 = series.iter().flatten().sum();

    let new_snow_24h = round_to_tenth(new_snow_24h_cm * CM_TO_INCHES);
    let new_snow_7d = (new_snow_7d_cm * CM_TO_INCHES).round();
    let snow_90d = (snow_90d_cm * CM_TO_INCHES).round();

    // Heavily weighted toward the last 24h: fresh snow is the storm signal.
    let raw_intensity = new_snow_24h * WEIGHT_24H + new_snow_7d * WEIGHT_7D;

    let boosted = if is_powder_region(region) {
        (raw_intensity * BOOST_FACTOR).max(BOOST_FLOOR)
    } else {
        raw_intensity
    };

    Ok(SnowTotals {
        new_snow_24h,
        new_snow_7d,
        snow_90d,
        intensity: round_to_tenth(boosted.clamp(0.0, 100.0)),
    })
}

/// Convenience wrapper taking the resort's region label.
pub fn aggregate_for(series: &DailySnowSeries, resort: &Resort) -> Result<SnowTotals, NoDataError> {
    aggregate(series, resort.region)
}

/// Whether a region label marks one of the boosted powder regions.
pub fn is_powder_region(region: &str) -> bool {
    POWDER_REGIONS.iter().any(|token| region.contains(token))
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
