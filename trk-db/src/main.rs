//! trk-db (Track Storage) - leaf service of the track chain
//!
//! Persists title → encoded audio records in SQLite and serves them under
//! `/db`. Default port 3001.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use trk_db::config::{Args, StorageConfig};
use trk_db::{build_router, db, AppState, SqliteTrackStore};

#[tokio::main]
async fn main() -> Result<()> {
    trk_common::logging::init_tracing();

    info!(
        "Starting trk-db (Track Storage) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = StorageConfig::resolve(Args::parse()).context("Failed to load configuration")?;
    info!("Database path: {}", config.database_path.display());

    let pool = db::init_database_pool(&config.database_path).await?;
    info!("✓ Connected to database");

    if config.expose_reset {
        info!("Test-support endpoint POST /db/reset is enabled");
    }

    let store = Arc::new(SqliteTrackStore::new(pool));
    let app = build_router(
        AppState::new(store, config.expose_reset).with_body_limit(config.max_body_bytes),
    );

    trk_common::server::serve(app, config.bind_addr, "trk-db")
        .await
        .context("Server error")?;

    Ok(())
}
