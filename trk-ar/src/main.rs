//! trk-ar (Audio Recognition) - entry point of the track chain
//!
//! Identifies a base64 audio fragment through AudD and returns the matching
//! catalogue record. Default port 3002.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use trk_ar::config::{Args, RecognitionConfig};
use trk_ar::{build_router, AppState, AuddClient, LookupClient};

#[tokio::main]
async fn main() -> Result<()> {
    trk_common::logging::init_tracing();

    info!(
        "Starting trk-ar (Audio Recognition) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config =
        RecognitionConfig::resolve(Args::parse()).context("Failed to load configuration")?;
    info!("Recognition provider: {}", config.provider_url);
    info!(
        "Lookup target: {} at {}",
        config.lookup_target, config.lookup_url
    );

    let provider = Arc::new(AuddClient::new(config.provider_url, config.api_token));
    let lookup = LookupClient::new(config.lookup_url, config.lookup_target);
    let app = build_router(AppState::new(provider, lookup));

    trk_common::server::serve(app, config.bind_addr, "trk-ar")
        .await
        .context("Server error")?;

    Ok(())
}
