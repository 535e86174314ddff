//! The refresh cycle and its hourly scheduler.
//!
//! A cycle walks the resort registry sequentially, paced by a token-style
//! interval so at most one archive request is in flight and requests stay
//! under the ~10/s courtesy ceiling. A failed resort never aborts the
//! cycle: it is logged and published as the zero-valued snapshot, and the
//! next hourly cycle is the retry mechanism.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use log::{error, info};
use tokio::time::{interval, MissedTickBehavior};

use super::aggregate::aggregate_for;
use super::fetch::{FetchError, SnowfallClient};
use super::snapshot::{ResortSnapshot, SnapshotCollection, SnapshotStore};
use crate::data::Resort;

/// Spacing between consecutive archive requests (~10 requests/second).
pub const RESORT_FETCH_SPACING: Duration = Duration::from_millis(100);

/// How often the scheduler re-runs a full cycle.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Runs one complete refresh cycle against the live archive.
pub async fn run_cycle(client: &SnowfallClient, resorts: &[Resort]) -> SnapshotCollection {
    run_cycle_with(resorts, |resort| {
        client.fetch_daily_snowfall(resort.lat, resort.lon)
    })
    .await
}

/// Cycle body with an injectable fetch function.
///
/// Every registry resort yields exactly one snapshot, in registry order;
/// fetch or aggregation failures substitute [`ResortSnapshot::zeroed`].
pub async fn run_cycle_with<F, Fut>(resorts: &[Resort], mut fetch: F) -> SnapshotCollection
where
    F: FnMut(&Resort) -> Fut,
    Fut: Future<Output = Result<Vec<Option<f64>>, FetchError>>,
{
    info!("Fetching snow data for {} resorts...", resorts.len());

    // Token clock: one request per tick. The first tick is immediate.
    let mut pacing = interval(RESORT_FETCH_SPACING);
    pacing.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut regions = Vec::with_capacity(resorts.len());
    for resort in resorts {
        pacing.tick().await;

        let snapshot = match fetch(resort).await {
            Ok(series) => match aggregate_for(&series, resort) {
                Ok(totals) => ResortSnapshot::from_totals(resort, totals),
                Err(e) => {
                    error!("Error aggregating data for {}: {}", resort.name, e);
                    ResortSnapshot::zeroed(resort)
                }
            },
            Err(e) => {
                error!("Error fetching data for {}: {}", resort.name, e);
                ResortSnapshot::zeroed(resort)
            }
        };
        regions.push(snapshot);
    }

    info!("Fetched data for {} resorts", regions.len());
    SnapshotCollection {
        timestamp: Utc::now(),
        regions,
    }
}

/// Spawns the background refresh loop: one cycle at startup, then one per
/// [`REFRESH_INTERVAL`]. Cycles run to completion before the next begins;
/// a concurrent manual refresh simply publishes over this loop's result.
pub fn spawn_refresh_loop(
    store: SnapshotStore,
    client: SnowfallClient,
    resorts: &'static [Resort],
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(REFRESH_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let collection = run_cycle(&client, resorts).await;
            store.publish(collection);
        }
    })
}
