//! trk-ar library - Recognition service
//!
//! Entry point of the chain: identifies an audio fragment through a
//! recognition provider, then looks the title up in the catalogue (or
//! directly in storage).

use axum::Router;
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod lookup;
pub mod provider;

pub use lookup::{LookupClient, LookupTarget};
pub use provider::{AuddClient, ProviderError, RecognitionOutcome, RecognitionProvider};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn RecognitionProvider>,
    pub lookup: LookupClient,
}

impl AppState {
    pub fn new(provider: Arc<dyn RecognitionProvider>, lookup: LookupClient) -> Self {
        Self { provider, lookup }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::recognise_routes())
        .merge(trk_common::health::health_routes(
            "trk-ar",
            env!("CARGO_PKG_VERSION"),
        ))
        .with_state(state)
}
