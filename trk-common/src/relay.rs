//! Downstream service addressing and response relaying
//!
//! A downstream answer is relayed with its status and body untouched, so the
//! caller sees the same kind the downstream service decided on.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::Url;

use crate::{Error, Result};

/// Base URL of a downstream service, validated at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Parse a base URL such as `http://localhost:3001`
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)
            .map_err(|e| Error::Config(format!("Invalid service URL {:?}: {}", raw, e)))?;

        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Service URL {:?} cannot carry a path",
                raw
            )));
        }

        Ok(Self(url))
    }

    /// Append path segments, percent-encoding each one
    ///
    /// `join(&["db", "tracks", "Blinding Lights"])` yields
    /// `.../db/tracks/Blinding%20Lights`.
    pub fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Convert a reqwest status into the server-side status type
pub fn status_from_reqwest(status: reqwest::StatusCode) -> StatusCode {
    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// A downstream response captured for pass-through
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Relayed {
    /// Read status, content type and body from a downstream response
    pub async fn from_response(response: reqwest::Response) -> reqwest::Result<Self> {
        let status = status_from_reqwest(response.status());
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(Self {
            status,
            content_type,
            body,
        })
    }
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        if self.body.is_empty() {
            return self.status.into_response();
        }

        let content_type = self
            .content_type
            .as_deref()
            .and_then(|ct| HeaderValue::from_str(ct).ok())
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));

        (
            self.status,
            [(header::CONTENT_TYPE, content_type)],
            Body::from(self.body),
        )
            .into_response()
    }
}
