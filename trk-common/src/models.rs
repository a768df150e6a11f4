//! Track wire types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stored track record: title is the unique key, `encoded_track` is an
/// opaque base64 audio payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub encoded_track: String,
}

/// Fields of an add-track request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    pub title: String,
    pub encoded_track: String,
}

impl NewTrack {
    /// Extract `title` and `encoded_track` from a JSON request body
    ///
    /// Returns `None` if either field is absent or not a string. Blank titles
    /// are accepted here; rejecting them is the catalogue's job.
    pub fn from_json(body: &Value) -> Option<Self> {
        let title = body.get("title")?.as_str()?;
        let encoded_track = body.get("encoded_track")?.as_str()?;

        Some(Self {
            title: title.to_string(),
            encoded_track: encoded_track.to_string(),
        })
    }
}

impl From<NewTrack> for Track {
    fn from(track: NewTrack) -> Self {
        Self {
            title: track.title,
            encoded_track: track.encoded_track,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_complete() {
        let track = NewTrack::from_json(&json!({"title": "X", "encoded_track": "AA=="}));
        assert_eq!(
            track,
            Some(NewTrack {
                title: "X".into(),
                encoded_track: "AA==".into()
            })
        );
    }

    #[test]
    fn test_from_json_missing_field() {
        assert!(NewTrack::from_json(&json!({"title": "Blinding Lights"})).is_none());
        assert!(NewTrack::from_json(&json!({"encoded_track": "AA=="})).is_none());
        assert!(NewTrack::from_json(&json!([])).is_none());
    }

    #[test]
    fn test_from_json_non_string_field() {
        assert!(NewTrack::from_json(&json!({"title": 7, "encoded_track": "AA=="})).is_none());
        assert!(NewTrack::from_json(&json!({"title": "X", "encoded_track": null})).is_none());
    }

    #[test]
    fn test_from_json_keeps_whitespace_title() {
        let track = NewTrack::from_json(&json!({"title": "   ", "encoded_track": "AA=="}))
            .expect("blank title is still a present field");
        assert_eq!(track.title, "   ");
    }
}
