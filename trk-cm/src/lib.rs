//! trk-cm library - Catalogue service
//!
//! Validates track-management requests and forwards them to the storage
//! service, relaying its status and body unchanged.

use axum::{extract::DefaultBodyLimit, Router};
use trk_common::api::DEFAULT_MAX_BODY_BYTES;

pub mod api;
pub mod client;
pub mod config;
pub mod validation;

pub use client::{StorageClient, StorageClientError};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Client for the downstream storage service
    pub storage: StorageClient,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(storage: StorageClient) -> Self {
        Self {
            storage,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    Router::new()
        .merge(api::track_routes())
        .merge(trk_common::health::health_routes(
            "trk-cm",
            env!("CARGO_PKG_VERSION"),
        ))
        .layer(body_limit)
        .with_state(state)
}
