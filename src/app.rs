//! The snowdar viewer application.

use chrono::{Duration as ChronoDuration, Utc};
use eframe::egui::{self, RichText};

use crate::config::ViewerConfig;
use crate::geo::{MapLoadError, WorldMap};
use crate::snow::feed::{FeedResult, SnowFeed};
use crate::state::{AppState, ViewMode};
use crate::ui;

/// How soon to retry after a failed feed request.
const FEED_RETRY_SECS: i64 = 60;

/// Main application state and logic.
pub struct SnowdarApp {
    /// Application state (view, interaction, snapshots)
    state: AppState,

    /// World boundary geometry, or the fatal load failure
    world: Result<WorldMap, MapLoadError>,

    /// Channel for background snapshot fetches
    feed: SnowFeed,

    config: ViewerConfig,

    /// Whether the initial snapshot fetch has been kicked off
    started: bool,
}

impl SnowdarApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: ViewerConfig,
        world: Result<WorldMap, MapLoadError>,
    ) -> Self {
        Self {
            state: AppState::new(),
            world,
            feed: SnowFeed::new(),
            config,
            started: false,
        }
    }

    fn drain_feed(&mut self) {
        if let Some(result) = self.feed.try_recv() {
            self.state.fetch_in_progress = false;
            match result {
                FeedResult::Snapshot(collection) => {
                    log::info!(
                        "Received snapshot collection: {} resorts at {}",
                        collection.regions.len(),
                        collection.timestamp
                    );
                    self.state.install_snapshots(collection);
                }
                FeedResult::Error(message) => {
                    log::error!("Snapshot feed failed: {}", message);
                    self.state.status_message = format!("Feed error: {message}");
                    // Try again shortly rather than waiting out the hour
                    self.state.next_update_at = Utc::now() + ChronoDuration::seconds(FEED_RETRY_SECS);
                }
            }
        }
    }
}

impl eframe::App for SnowdarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A missing world map is the one fatal failure: show the alert and
        // render nothing else.
        if let Err(error) = &self.world {
            render_map_error(ctx, error);
            return;
        }

        // Initial snapshot fetch on the first frame
        if !self.started {
            self.started = true;
            self.state.fetch_in_progress = true;
            self.feed
                .fetch_snapshots(ctx.clone(), self.config.service_url.clone());
        }

        self.drain_feed();

        // Manual refresh from the top bar: full service cycle, then fetch
        if self.state.refresh_requested {
            self.state.refresh_requested = false;
            if !self.state.fetch_in_progress {
                self.state.fetch_in_progress = true;
                self.state.status_message = "Refreshing all resorts...".to_string();
                self.feed
                    .refresh_and_fetch(ctx.clone(), self.config.service_url.clone());
            }
        }

        // Hourly countdown expiry re-fetches the cached collection
        if !self.state.fetch_in_progress && self.state.update_due(Utc::now()) {
            log::info!("Auto-refreshing snow data...");
            self.state.fetch_in_progress = true;
            self.feed
                .fetch_snapshots(ctx.clone(), self.config.service_url.clone());
        }

        // Advance the idle timer and the slow rotation
        let now = ctx.input(|i| i.time);
        self.state.interaction.tick(now);
        if self.state.viz.mode == ViewMode::Globe && self.state.interaction.is_auto_rotating() {
            let dt = ctx.input(|i| i.stable_dt).min(0.1);
            self.state.viz.step_auto_rotation(dt as f64);
        }

        ui::render_top_bar(ctx, &mut self.state);
        ui::render_side_panel(ctx, &mut self.state);
        let world = self
            .world
            .as_ref()
            .expect("world map presence checked at start of update");
        ui::render_canvas(ctx, &mut self.state, world);

        // Keep the pulse animation and countdown ticking
        ctx.request_repaint_after(std::time::Duration::from_millis(50));
    }
}

/// Full-window blocking alert for a failed world map load.
fn render_map_error(ctx: &egui::Context, error: &MapLoadError) {
    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(ui::colors::ui::BACKGROUND))
        .show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!(
                        "COULD NOT LOAD WORLD MAP DATA\n\n{error}\n\nRestart the viewer to retry."
                    ))
                    .monospace()
                    .size(16.0)
                    .color(ui::colors::ui::ERROR),
                );
            });
        });
}
