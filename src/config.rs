//! Environment-driven configuration.

use std::env;

use crate::geo::layer::WORLD_GEOJSON_URL;
use crate::snow::fetch::DEFAULT_ARCHIVE_URL;

/// Default listen port, matching the original service.
pub const DEFAULT_PORT: u16 = 8080;

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`PORT`).
    pub port: u16,
    /// Weather archive base URL (`SNOWDAR_ARCHIVE_URL`).
    pub archive_url: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults. An unparseable `PORT` falls back to the default rather
    /// than failing startup.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let archive_url =
            env::var("SNOWDAR_ARCHIVE_URL").unwrap_or_else(|_| DEFAULT_ARCHIVE_URL.to_string());
        Self { port, archive_url }
    }
}

/// Viewer configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Base URL of the snowdar service (`SNOWDAR_URL`).
    pub service_url: String,
    /// World boundary GeoJSON source (`SNOWDAR_WORLD_URL`).
    pub world_url: String,
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        let service_url = env::var("SNOWDAR_URL")
            .unwrap_or_else(|_| format!("http://localhost:{DEFAULT_PORT}"));
        let world_url =
            env::var("SNOWDAR_WORLD_URL").unwrap_or_else(|_| WORLD_GEOJSON_URL.to_string());
        Self {
            service_url,
            world_url,
        }
    }
}
