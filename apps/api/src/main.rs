mod config;
mod cv;
mod errors;
mod models;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::cv::store::CvStore;
use crate::render::default_page_geometry;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CvForge API v{}", env!("CARGO_PKG_VERSION"));

    // The single piece of persistent state: one YAML document on disk.
    let store = CvStore::new(&config.data_file);
    if config.data_file.exists() {
        info!("Data file: {}", config.data_file.display());
    } else {
        warn!(
            "Data file {} does not exist yet; save it through the API first",
            config.data_file.display()
        );
    }

    // Renderer page geometry (A4, 18/10 mm margins, 33 mm photo)
    let geometry = default_page_geometry();
    info!(
        "Page geometry: {:.0}x{:.0}pt, photo {}px",
        geometry.page_width, geometry.page_height, geometry.photo_resolution
    );

    // Build app state
    let state = AppState {
        store,
        config: config.clone(),
        geometry,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // local single-user tool, editor runs on another port

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
