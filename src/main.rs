//! Viewer entry point.

use snowdar::app::SnowdarApp;
use snowdar::config::ViewerConfig;
use snowdar::geo::WorldMap;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = ViewerConfig::from_env();

    // The world map is required before anything can render; a failure is
    // carried into the app, which shows the blocking alert.
    log::info!("Loading world map from {}", config.world_url);
    let world = WorldMap::fetch(&config.world_url);
    if let Err(ref e) = world {
        log::error!("Error loading map: {}", e);
    }

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "SNOWDAR",
        native_options,
        Box::new(|cc| Ok(Box::new(SnowdarApp::new(cc, config, world)))),
    )
}
