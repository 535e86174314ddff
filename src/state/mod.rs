//! Viewer application state.
//!
//! State is grouped by concern: `viz` holds the view controls, and
//! `interaction` the rotation/zoom state machine. The root state carries
//! the latest snapshot collection and the hourly update countdown.

mod interaction;
mod viz;

pub use interaction::{InteractionPhase, InteractionState, IDLE_RESUME_SECS};
pub use viz::{ViewMode, VizState, AUTO_ROTATE_DEG_PER_SEC, INITIAL_ZOOM};

use chrono::{DateTime, Duration, Utc};

use crate::snow::refresh::REFRESH_INTERVAL;
use crate::snow::SnapshotCollection;

/// Root viewer state.
pub struct AppState {
    /// View controls (mode, zoom, rotation center)
    pub viz: VizState,

    /// Rotation/zoom interaction machine
    pub interaction: InteractionState,

    /// Latest snapshot collection received from the service
    pub snapshots: SnapshotCollection,

    /// Index into `snapshots.regions` of the hovered hotspot
    pub hovered: Option<usize>,

    /// Status message shown in the top bar
    pub status_message: String,

    /// Whether a feed request is currently in flight
    pub fetch_in_progress: bool,

    /// Set by the top bar to request a manual service refresh
    pub refresh_requested: bool,

    /// When the next automatic data refresh is due
    pub next_update_at: DateTime<Utc>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            viz: VizState::default(),
            interaction: InteractionState::new(),
            snapshots: SnapshotCollection::empty(),
            hovered: None,
            status_message: "Loading snow data...".to_string(),
            fetch_in_progress: false,
            refresh_requested: false,
            next_update_at: next_update_after(Utc::now()),
        }
    }

    /// Installs a freshly fetched collection and restarts the countdown.
    pub fn install_snapshots(&mut self, collection: SnapshotCollection) {
        self.status_message = format!("{} resorts tracked", collection.regions.len());
        self.snapshots = collection;
        self.hovered = None;
        self.next_update_at = next_update_after(Utc::now());
    }

    /// Whether the hourly countdown has expired.
    pub fn update_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_update_at
    }

    /// "MM:SS" until the next automatic refresh.
    pub fn countdown_label(&self, now: DateTime<Utc>) -> String {
        let remaining = (self.next_update_at - now).num_seconds().max(0);
        format!("{:02}:{:02}", remaining / 60, remaining % 60)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn next_update_after(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::from_std(REFRESH_INTERVAL).expect("refresh interval fits chrono")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_counts_down_to_zero() {
        let state = AppState::new();
        let due = state.next_update_at;

        assert_eq!(state.countdown_label(due - Duration::seconds(90)), "01:30");
        assert_eq!(state.countdown_label(due), "00:00");
        // Past-due never goes negative.
        assert_eq!(state.countdown_label(due + Duration::seconds(5)), "00:00");
        assert!(state.update_due(due));
        assert!(!state.update_due(due - Duration::seconds(1)));
    }

    #[test]
    fn installing_snapshots_restarts_the_countdown() {
        let mut state = AppState::new();
        state.next_update_at = Utc::now() - Duration::seconds(10);
        assert!(state.update_due(Utc::now()));

        state.install_snapshots(SnapshotCollection::empty());
        assert!(!state.update_due(Utc::now()));
        assert_eq!(state.status_message, "0 resorts tracked");
    }
}
