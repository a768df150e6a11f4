//! trk-cm (Track Catalogue) - middle service of the track chain
//!
//! Validates track-management requests and forwards them to trk-db.
//! Default port 3000.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use trk_cm::config::{Args, CatalogueConfig};
use trk_cm::{build_router, AppState, StorageClient};

#[tokio::main]
async fn main() -> Result<()> {
    trk_common::logging::init_tracing();

    info!(
        "Starting trk-cm (Track Catalogue) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = CatalogueConfig::resolve(Args::parse()).context("Failed to load configuration")?;
    info!("Storage service: {}", config.storage_url);

    let app = build_router(
        AppState::new(StorageClient::new(config.storage_url))
            .with_body_limit(config.max_body_bytes),
    );

    trk_common::server::serve(app, config.bind_addr, "trk-cm")
        .await
        .context("Server error")?;

    Ok(())
}
