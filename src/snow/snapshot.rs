//! Snapshot records and the atomically-replaced snapshot store.
//!
//! A refresh cycle produces one [`ResortSnapshot`] per registry resort and
//! publishes them as a single [`SnapshotCollection`]. The collection is
//! immutable once published; the store swaps whole generations, so readers
//! never observe a partially updated set.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::SnowTotals;
use crate::data::Resort;

/// One resort's display-ready record for the current refresh cycle.
///
/// The field set matches the wire shape consumed by the viewer:
/// coordinates are `[lon, lat]`, rollups are in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortSnapshot {
    pub name: String,
    /// `[longitude, latitude]` in degrees.
    pub coords: [f64; 2],
    /// Total snowfall over the trailing 90 days, whole inches.
    pub snow_90d: f64,
    /// Snowfall over the most recent day, inches, 1 decimal place.
    pub new_snow_24h: f64,
    /// Snowfall over the last 7 days, whole inches.
    pub new_snow_7d: f64,
    /// Number of resorts behind this datapoint. Always 1; kept for wire
    /// compatibility with the earlier region-grouped revision.
    pub resort_count: u32,
    /// Intensity score in [0, 100].
    pub intensity: f64,
    /// Resort names behind this datapoint. Always `[name]`.
    pub resorts: Vec<String>,
    pub region: String,
    /// Base elevation in meters.
    pub elevation: i32,
}

impl ResortSnapshot {
    /// Builds a snapshot from aggregated totals.
    pub fn from_totals(resort: &Resort, totals: SnowTotals) -> Self {
        Self {
            name: resort.name.to_string(),
            coords: [resort.lon, resort.lat],
            snow_90d: totals.snow_90d,
            new_snow_24h: totals.new_snow_24h,
            new_snow_7d: totals.new_snow_7d,
            resort_count: 1,
            intensity: totals.intensity,
            resorts: vec![resort.name.to_string()],
            region: resort.region.to_string(),
            elevation: resort.elevation,
        }
    }

    /// The all-zero fallback published when a resort's fetch or
    /// aggregation fails. Never surfaced to clients as an error.
    pub fn zeroed(resort: &Resort) -> Self {
        Self::from_totals(resort, SnowTotals::ZERO)
    }
}

/// A timestamped, complete set of snapshots from one refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCollection {
    /// When the cycle that produced this collection completed.
    pub timestamp: DateTime<Utc>,
    /// One entry per registry resort, in registry order.
    ///
    /// Named `regions` on the wire for front-end compatibility.
    pub regions: Vec<ResortSnapshot>,
}

impl SnapshotCollection {
    /// An empty collection, served until the first cycle completes.
    pub fn empty() -> Self {
        Self {
            timestamp: Utc::now(),
            regions: Vec::new(),
        }
    }
}

/// Process-wide holder of the latest snapshot collection.
///
/// Publishing replaces the inner `Arc` wholesale under a short write lock;
/// readers clone the `Arc` and keep using their generation for as long as
/// they like. Concurrent publishes are last-write-wins.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<SnapshotCollection>>>,
}

impl SnapshotStore {
    /// Creates a store holding an empty collection.
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(SnapshotCollection::empty()))),
        }
    }

    /// Returns the latest published collection.
    pub fn current(&self) -> Arc<SnapshotCollection> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Publishes a new collection, replacing the previous generation.
    pub fn publish(&self, collection: SnapshotCollection) {
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Arc::new(collection);
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::get_resort;

    #[test]
    fn zeroed_snapshot_matches_wire_shape() {
        let resort = get_resort("Niseko United").unwrap();
        let snapshot = ResortSnapshot::zeroed(resort);

        assert_eq!(snapshot.coords, [resort.lon, resort.lat]);
        assert_eq!(snapshot.resort_count, 1);
        assert_eq!(snapshot.resorts, vec![resort.name.to_string()]);
        assert_eq!(snapshot.intensity, 0.0);

        let json = serde_json::to_value(&snapshot).unwrap();
        for key in [
            "name",
            "coords",
            "snow_90d",
            "new_snow_24h",
            "new_snow_7d",
            "resort_count",
            "intensity",
            "resorts",
            "region",
            "elevation",
        ] {
            assert!(json.get(key).is_some(), "missing wire field {key}");
        }
    }

    #[test]
    fn store_swaps_whole_generations() {
        let store = SnapshotStore::new();
        let first = store.current();
        assert!(first.regions.is_empty());

        let resort = get_resort("Alta").unwrap();
        let mut collection = SnapshotCollection::empty();
        collection.regions.push(ResortSnapshot::zeroed(resort));
        store.publish(collection.clone());

        // The earlier reader still sees its generation in full.
        assert!(first.regions.is_empty());
        assert_eq!(store.current().regions.len(), 1);

        // Last write wins.
        store.publish(SnapshotCollection::empty());
        assert!(store.current().regions.is_empty());
    }

    #[test]
    fn collection_round_trips_through_json() {
        let resort = get_resort("Zermatt").unwrap();
        let mut collection = SnapshotCollection::empty();
        collection.regions.push(ResortSnapshot::zeroed(resort));

        let json = serde_json::to_string(&collection).unwrap();
        let decoded: SnapshotCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, collection);
    }
}
