//! HTTP client for the storage service
//!
//! Each call returns the storage answer as a [`Relayed`] response; the
//! catalogue never re-derives the status. Only a failed round trip is an
//! error here.

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use trk_common::{Relayed, ServiceUrl};

/// Storage round-trip failure
#[derive(Debug, Error)]
pub enum StorageClientError {
    /// Connection refused, reset, or body read failure
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the storage service's `/db` endpoints
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: Client,
    base_url: ServiceUrl,
}

impl StorageClient {
    pub fn new(base_url: ServiceUrl) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// POST /db/tracks with the caller's body forwarded verbatim
    pub async fn add_track(&self, body: &Value) -> Result<Relayed, StorageClientError> {
        let url = self.base_url.join(&["db", "tracks"]);
        debug!("Forwarding add to {}", url);

        let response = self.http.post(url).json(body).send().await?;
        Ok(Relayed::from_response(response).await?)
    }

    /// DELETE /db/tracks/{title}
    pub async fn delete_track(&self, title: &str) -> Result<Relayed, StorageClientError> {
        let url = self.base_url.join(&["db", "tracks", title]);
        debug!("Forwarding delete to {}", url);

        let response = self.http.delete(url).send().await?;
        Ok(Relayed::from_response(response).await?)
    }

    /// GET /db/tracks
    pub async fn list_tracks(&self) -> Result<Relayed, StorageClientError> {
        let url = self.base_url.join(&["db", "tracks"]);
        debug!("Forwarding list to {}", url);

        let response = self.http.get(url).send().await?;
        Ok(Relayed::from_response(response).await?)
    }

    /// GET /db/tracks/search, omitting `title` when the caller did
    pub async fn search_tracks(&self, title: Option<&str>) -> Result<Relayed, StorageClientError> {
        let url = self.base_url.join(&["db", "tracks", "search"]);
        debug!("Forwarding search to {}", url);

        let mut request = self.http.get(url);
        if let Some(title) = title {
            request = request.query(&[("title", title)]);
        }

        let response = request.send().await?;
        Ok(Relayed::from_response(response).await?)
    }
}
