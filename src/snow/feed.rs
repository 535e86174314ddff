//! Snapshot feed for the viewer.
//!
//! The viewer's update loop is synchronous, so HTTP calls against the
//! backend run on worker threads and report back over a channel; each
//! completion requests a repaint so results are picked up promptly.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use eframe::egui;

use super::snapshot::SnapshotCollection;

/// Result of a background feed operation.
#[derive(Debug)]
pub enum FeedResult {
    /// A fresh snapshot collection from `/api/snow-data`.
    Snapshot(SnapshotCollection),
    /// The feed request failed; the previous collection stays on screen.
    Error(String),
}

/// Channel-based bridge between feed worker threads and the UI thread.
pub struct SnowFeed {
    sender: Sender<FeedResult>,
    receiver: Receiver<FeedResult>,
}

impl SnowFeed {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Fetches the cached snapshot collection from the backend.
    pub fn fetch_snapshots(&self, ctx: egui::Context, base_url: String) {
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let result = match fetch_snapshot_collection(&base_url) {
                Ok(collection) => FeedResult::Snapshot(collection),
                Err(e) => FeedResult::Error(e.to_string()),
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Asks the backend for a synchronous full refresh cycle, then fetches
    /// the newly published collection.
    pub fn refresh_and_fetch(&self, ctx: egui::Context, base_url: String) {
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let result = match trigger_refresh(&base_url) {
                Ok(()) => match fetch_snapshot_collection(&base_url) {
                    Ok(collection) => FeedResult::Snapshot(collection),
                    Err(e) => FeedResult::Error(e.to_string()),
                },
                Err(e) => FeedResult::Error(e.to_string()),
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Non-blocking check for a completed feed operation.
    pub fn try_recv(&self) -> Option<FeedResult> {
        self.receiver.try_recv().ok()
    }
}

impl Default for SnowFeed {
    fn default() -> Self {
        Self::new()
    }
}

fn fetch_snapshot_collection(base_url: &str) -> Result<SnapshotCollection, reqwest::Error> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    client
        .get(format!("{base_url}/api/snow-data"))
        .send()?
        .error_for_status()?
        .json()
}

fn trigger_refresh(base_url: &str) -> Result<(), reqwest::Error> {
    // A full cycle walks every resort at ~10 requests/second, so this can
    // legitimately take a couple of minutes.
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()?;
    client
        .get(format!("{base_url}/api/refresh"))
        .send()?
        .error_for_status()?;
    Ok(())
}
