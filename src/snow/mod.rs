//! Snowfall domain: archive fetch, aggregation, snapshots, refresh.
//!
//! Data flows registry -> fetch -> aggregate -> snapshot store, one full
//! pass per refresh cycle. `feed` is the viewer-side consumer of the
//! published snapshots.

pub mod aggregate;
pub mod feed;
pub mod fetch;
pub mod refresh;
pub mod snapshot;

pub use aggregate::{aggregate, NoDataError, SnowTotals};
pub use fetch::{FetchError, SnowfallClient};
pub use snapshot::{ResortSnapshot, SnapshotCollection, SnapshotStore};
