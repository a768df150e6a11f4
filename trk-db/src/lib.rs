//! trk-db library - Track storage service
//!
//! Owns the single track table (title → encoded audio) and exposes it under
//! `/db`. Every storage fault is reported as 503, never as a 500.

use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use trk_common::api::DEFAULT_MAX_BODY_BYTES;

pub mod api;
pub mod config;
pub mod db;
pub mod store;

pub use store::{SqliteTrackStore, StoreError, TrackStore};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Track store, constructed once at startup
    pub store: Arc<dyn TrackStore>,
    /// Whether `POST /db/reset` is mounted
    pub expose_reset: bool,
    /// Largest accepted request body; an encoded track is a whole audio file
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn TrackStore>, expose_reset: bool) -> Self {
        Self {
            store,
            expose_reset,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// State over a SQLite pool with the reset endpoint enabled
    pub fn with_pool(pool: sqlx::SqlitePool) -> Self {
        Self::new(Arc::new(SqliteTrackStore::new(pool)), true)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(api::track_routes())
        .merge(trk_common::health::health_routes(
            "trk-db",
            env!("CARGO_PKG_VERSION"),
        ));

    if state.expose_reset {
        router = router.merge(api::reset_routes());
    }

    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);
    router.layer(body_limit).with_state(state)
}
