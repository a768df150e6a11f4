//! Test-support reset endpoint
//!
//! Integration suites call `POST /db/reset` between tests. It is not part of
//! the client-facing contract and is mounted only with `expose_reset = true`.

use axum::{extract::State, routing::post, Json, Router};
use tracing::info;
use trk_common::{ApiError, MessageBody};

use crate::AppState;

/// POST /db/reset
pub async fn reset_database(State(state): State<AppState>) -> Result<Json<MessageBody>, ApiError> {
    state.store.reset().await?;
    info!("Database reset successfully");

    Ok(Json(MessageBody::new("Database reset successfully")))
}

/// Build reset routes
pub fn reset_routes() -> Router<AppState> {
    Router::new().route("/db/reset", post(reset_database))
}
