//! Service entry point: refresh scheduler plus the HTTP API.

use log::info;

use snowdar::config::Config;
use snowdar::data::SKI_RESORTS;
use snowdar::server::{self, ApiContext};
use snowdar::snow::refresh::spawn_refresh_loop;
use snowdar::snow::{SnapshotStore, SnowfallClient};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let store = SnapshotStore::new();
    let client = SnowfallClient::with_base_url(config.archive_url.clone());

    info!("============================================================");
    info!("  SNOWDAR TERMINAL");
    info!("  Tracking {} resorts, refresh every hour", SKI_RESORTS.len());
    info!("============================================================");

    // First cycle fires immediately, then hourly.
    spawn_refresh_loop(store.clone(), client.clone(), SKI_RESORTS);

    let ctx = ApiContext {
        store,
        client,
        resorts: SKI_RESORTS,
    };
    server::run(&config, ctx).await
}
