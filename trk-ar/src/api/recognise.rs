//! POST /recognise
//!
//! fragment → provider → title → lookup → track record

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Router,
};
use serde_json::Value;
use tracing::{info, warn};
use trk_common::{ApiError, JsonBody, Relayed};

use crate::provider::{status_for_provider_code, RecognitionOutcome};
use crate::AppState;

pub const MISSING_FRAGMENT: &str = "Missing encoded_track_fragment";
pub const NOT_RECOGNISED: &str = "Track not recognised";
pub const PROVIDER_ERROR: &str = "Recognition provider error";
pub const NOT_IN_CATALOGUE: &str = "Track not found in catalogue";
pub const CATALOGUE_ERROR: &str = "Catalogue service error";
pub const CATALOGUE_UNAVAILABLE: &str = "Catalogue service unavailable";

/// Non-empty string `encoded_track_fragment`, or 400
fn fragment_of(body: &Value) -> Result<&str, ApiError> {
    match body.get("encoded_track_fragment").and_then(Value::as_str) {
        Some(fragment) if !fragment.is_empty() => Ok(fragment),
        _ => {
            warn!("{}", MISSING_FRAGMENT);
            Err(ApiError::BadRequest(MISSING_FRAGMENT.to_string()))
        }
    }
}

/// POST /recognise
pub async fn recognise(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Relayed, ApiError> {
    let fragment = fragment_of(&body)?;

    let outcome = state.provider.recognise(fragment).await.map_err(|e| {
        warn!(provider = state.provider.name(), "{}", e);
        ApiError::Internal(PROVIDER_ERROR.to_string())
    })?;

    let title = match outcome {
        RecognitionOutcome::Matched { title } => title,
        RecognitionOutcome::NoMatch => {
            warn!("{}", NOT_RECOGNISED);
            return Err(ApiError::NotFound(NOT_RECOGNISED.to_string()));
        }
        RecognitionOutcome::Rejected { code, message } => {
            let status = status_for_provider_code(code);
            warn!(code = code, status = %status, "Provider rejected fragment: {}", message);
            return Err(ApiError::ProviderRejected(status, message));
        }
    };

    info!("Recognised {:?}, looking it up in {}", title, state.lookup.target());

    let relayed = state.lookup.search(&title).await.map_err(|e| {
        warn!("Lookup failed: {}", e);
        ApiError::Unavailable(CATALOGUE_UNAVAILABLE.to_string())
    })?;

    match relayed.status {
        StatusCode::OK => {
            info!("Track found in catalogue");
            Ok(relayed)
        }
        StatusCode::NOT_FOUND => {
            info!("{}", NOT_IN_CATALOGUE);
            Err(ApiError::NotFound(NOT_IN_CATALOGUE.to_string()))
        }
        status => {
            warn!("Unexpected status {} from lookup", status);
            Err(ApiError::Upstream(status, CATALOGUE_ERROR.to_string()))
        }
    }
}

/// Build recognition routes
pub fn recognise_routes() -> Router<AppState> {
    Router::new().route("/recognise", post(recognise))
}
