//! Static datasets.
//!
//! - `resorts`: the fixed ski resort catalog (names, coordinates,
//!   elevations, region labels) that every refresh cycle iterates over.

pub mod resorts;

// Re-export static resort data
pub use resorts::{get_resort, Resort, SKI_RESORTS};
