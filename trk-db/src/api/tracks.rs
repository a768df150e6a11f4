//! Track endpoints under `/db/tracks`
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | POST | /db/tracks | 201 `{title, message}` | 400, 409, 413, 415, 503 |
//! | DELETE | /db/tracks/:title | 200 `{message}` | 400, 404, 503 |
//! | GET | /db/tracks | 200 `[...]` | 503 |
//! | GET | /db/tracks/search?title= | 200 `{title, encoded_track}` | 400, 404, 503 |

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use trk_common::{ApiError, JsonBody, MessageBody, NewTrack, PathParam, QueryParams, Track};

use crate::store::StoreError;
use crate::AppState;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const MISSING_TITLE_PARAM: &str = "Missing title query parameter";
pub const TRACK_EXISTS: &str = "Track already exists";
pub const TRACK_NOT_FOUND: &str = "Track not found";
pub const DATABASE_UNREACHABLE: &str = "Database unreachable";

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(title) => {
                warn!("Attempted to add duplicate track: {}", title);
                ApiError::Conflict(TRACK_EXISTS.to_string())
            }
            StoreError::Unavailable(reason) => {
                warn!("Database unreachable: {}", reason);
                ApiError::Unavailable(DATABASE_UNREACHABLE.to_string())
            }
        }
    }
}

/// Response for a created track
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackAdded {
    pub title: String,
    pub message: String,
}

/// Query parameters for title search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
}

/// POST /db/tracks
///
/// Missing fields are rejected before the store is touched. The title is
/// stored as given; blank-title rejection happens in the catalogue.
pub async fn add_track(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<(StatusCode, Json<TrackAdded>), ApiError> {
    let track = NewTrack::from_json(&body).ok_or_else(|| {
        warn!("Missing required fields");
        ApiError::BadRequest(MISSING_FIELDS.to_string())
    })?;

    let title = state.store.insert(&track).await?;
    info!("Track added: {}", title);

    Ok((
        StatusCode::CREATED,
        Json(TrackAdded {
            title,
            message: "Track added successfully".to_string(),
        }),
    ))
}

/// DELETE /db/tracks/:title
pub async fn delete_track(
    State(state): State<AppState>,
    PathParam(title): PathParam<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let deleted_rows = state.store.remove_by_title(&title).await?;

    if deleted_rows == 0 {
        warn!("Track not found for delete: {}", title);
        return Err(ApiError::NotFound(TRACK_NOT_FOUND.to_string()));
    }

    info!("Track deleted: {}", title);
    Ok(Json(MessageBody::new("Track deleted successfully")))
}

/// GET /db/tracks
pub async fn list_tracks(State(state): State<AppState>) -> Result<Json<Vec<Track>>, ApiError> {
    let tracks = state.store.list_all().await?;
    info!("Returned {} tracks", tracks.len());

    Ok(Json(tracks))
}

/// GET /db/tracks/search?title=
pub async fn search_tracks(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<Track>, ApiError> {
    let title = query.title.filter(|t| !t.is_empty()).ok_or_else(|| {
        warn!("Missing title query parameter");
        ApiError::BadRequest(MISSING_TITLE_PARAM.to_string())
    })?;

    match state.store.find_by_title(&title).await? {
        Some(track) => {
            info!("Track found: {}", title);
            Ok(Json(track))
        }
        None => {
            warn!("Track not found: {}", title);
            Err(ApiError::NotFound(TRACK_NOT_FOUND.to_string()))
        }
    }
}

/// Build track routes
pub fn track_routes() -> Router<AppState> {
    Router::new()
        .route("/db/tracks", post(add_track).get(list_tracks))
        .route("/db/tracks/search", get(search_tracks))
        .route("/db/tracks/:title", delete(delete_track))
}
