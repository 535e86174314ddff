#![warn(clippy::all)]

//! SNOWDAR - live ski-resort snowfall intensity on a rotatable globe.
//!
//! Two halves share this crate:
//! - the service (`server` binary) polls a public weather archive hourly,
//!   scores each resort's recent snowfall, and serves the aggregated
//!   snapshot collection over HTTP;
//! - the viewer (`snowdar` binary) draws the snapshots as glowing
//!   hotspots on an orthographic globe or a flat equirectangular map.

pub mod app;
pub mod config;
pub mod data;
pub mod geo;
pub mod server;
pub mod snow;
pub mod state;
pub mod ui;
