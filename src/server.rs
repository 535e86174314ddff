//! HTTP surface of the snowdar service.
//!
//! Three routes, mirroring the original terminal app:
//! - `GET /api/snow-data` serves the cached snapshot collection and never
//!   blocks on a live refresh.
//! - `GET /api/refresh` runs a full refresh cycle before answering.
//! - `GET /` serves the embedded entry page.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::data::Resort;
use crate::snow::refresh::run_cycle;
use crate::snow::{SnapshotCollection, SnapshotStore, SnowfallClient};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct ApiContext {
    pub store: SnapshotStore,
    pub client: SnowfallClient,
    pub resorts: &'static [Resort],
}

/// Builds the service router. CORS is wide open, as in the original.
pub fn router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/snow-data", get(snow_data))
        .route("/api/refresh", get(refresh))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Binds the listener and serves until shutdown.
pub async fn run(config: &Config, ctx: ApiContext) -> std::io::Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, router(ctx)).await
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Always 200; readers get whichever complete generation is current.
async fn snow_data(State(ctx): State<ApiContext>) -> Json<SnapshotCollection> {
    Json(ctx.store.current().as_ref().clone())
}

#[derive(Debug, Serialize)]
struct RefreshResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

/// Runs a full cycle synchronously, publishes it, and reports the new
/// collection's timestamp.
async fn refresh(State(ctx): State<ApiContext>) -> Json<RefreshResponse> {
    info!("Manual refresh requested");
    let collection = run_cycle(&ctx.client, ctx.resorts).await;
    let timestamp = collection.timestamp;
    ctx.store.publish(collection);
    Json(RefreshResponse {
        status: "success",
        timestamp,
    })
}
