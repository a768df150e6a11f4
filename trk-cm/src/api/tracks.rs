//! Track endpoints under `/tracks`
//!
//! Same verbs and paths as the storage service without the `/db` prefix.
//! Validation failures short-circuit with 400; everything else is forwarded
//! and the storage status and body come back verbatim.

use axum::{
    extract::State,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use trk_common::{ApiError, JsonBody, PathParam, QueryParams, Relayed};

use crate::client::StorageClientError;
use crate::validation::{check_new_track, check_title, NO_TITLE};
use crate::AppState;

pub const STORAGE_UNAVAILABLE: &str = "Storage service unavailable";

impl From<StorageClientError> for ApiError {
    fn from(err: StorageClientError) -> Self {
        warn!("{}", err);
        ApiError::Unavailable(STORAGE_UNAVAILABLE.to_string())
    }
}

/// Query parameters for title search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
}

fn log_relayed(operation: &str, relayed: &Relayed) {
    if relayed.status.is_success() {
        info!("{}: storage answered {}", operation, relayed.status);
    } else {
        warn!("{}: storage answered {}", operation, relayed.status);
    }
}

/// POST /tracks
pub async fn add_track(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Relayed, ApiError> {
    check_new_track(&body)?;

    let relayed = state.storage.add_track(&body).await?;
    log_relayed("add", &relayed);

    Ok(relayed)
}

/// DELETE /tracks/:title
///
/// A blank title never reaches the storage service.
pub async fn delete_track(
    State(state): State<AppState>,
    PathParam(title): PathParam<String>,
) -> Result<Relayed, ApiError> {
    check_title(&title)?;

    let relayed = state.storage.delete_track(&title).await?;
    log_relayed("delete", &relayed);

    Ok(relayed)
}

/// DELETE /tracks/ (no title segment)
pub async fn delete_without_title() -> ApiError {
    warn!("No track title provided");
    ApiError::BadRequest(NO_TITLE.to_string())
}

/// GET /tracks
pub async fn list_tracks(State(state): State<AppState>) -> Result<Relayed, ApiError> {
    let relayed = state.storage.list_tracks().await?;
    log_relayed("list", &relayed);

    Ok(relayed)
}

/// GET /tracks/search?title=
pub async fn search_tracks(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Relayed, ApiError> {
    let relayed = state.storage.search_tracks(query.title.as_deref()).await?;
    log_relayed("search", &relayed);

    Ok(relayed)
}

/// Build track routes
pub fn track_routes() -> Router<AppState> {
    Router::new()
        .route("/tracks", post(add_track).get(list_tracks))
        .route("/tracks/", delete(delete_without_title))
        .route("/tracks/search", get(search_tracks))
        .route("/tracks/:title", delete(delete_track))
}
