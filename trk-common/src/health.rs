//! Health check endpoint

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status, always "ok" while the process answers
    pub status: String,
    /// Module name (e.g. "trk-db")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since the router was built
    pub uptime_seconds: u64,
}

impl HealthResponse {
    fn new(module: &str, version: &str, started: DateTime<Utc>) -> Self {
        let uptime = Utc::now().signed_duration_since(started);

        Self {
            status: "ok".to_string(),
            module: module.to_string(),
            version: version.to_string(),
            uptime_seconds: uptime.num_seconds().max(0) as u64,
        }
    }
}

/// Build `GET /health` for a module
///
/// Pass `env!("CARGO_PKG_VERSION")` from the service crate as `version`.
pub fn health_routes<S>(module: &'static str, version: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let started = Utc::now();

    Router::new().route(
        "/health",
        get(move || async move { Json(HealthResponse::new(module, version, started)) }),
    )
}
