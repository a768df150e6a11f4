//! Catalogue-level request validation
//!
//! The storage service only checks that fields are present. The catalogue
//! additionally rejects titles that are blank after trimming.

use serde_json::Value;
use tracing::warn;
use trk_common::{ApiError, NewTrack};

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const BLANK_TITLE: &str = "Track title must not be blank";
pub const NO_TITLE: &str = "No track title provided";

/// Reject titles that are empty after trimming whitespace
pub fn check_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        warn!("Rejected blank track title");
        return Err(ApiError::BadRequest(BLANK_TITLE.to_string()));
    }
    Ok(())
}

/// Validate an add-track body before it is forwarded
pub fn check_new_track(body: &Value) -> Result<NewTrack, ApiError> {
    let track = NewTrack::from_json(body).ok_or_else(|| {
        warn!("Missing required fields");
        ApiError::BadRequest(MISSING_FIELDS.to_string())
    })?;

    check_title(&track.title)?;
    Ok(track)
}
