//! Title lookup against the catalogue or the storage service

use clap::ValueEnum;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use trk_common::{Relayed, ServiceUrl};

/// Which service answers title searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LookupTarget {
    /// `GET {url}/tracks/search`
    #[default]
    Catalogue,
    /// `GET {url}/db/tracks/search`
    Storage,
}

impl LookupTarget {
    fn search_path(self) -> &'static [&'static str] {
        match self {
            LookupTarget::Catalogue => &["tracks", "search"],
            LookupTarget::Storage => &["db", "tracks", "search"],
        }
    }
}

impl std::fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupTarget::Catalogue => f.write_str("catalogue"),
            LookupTarget::Storage => f.write_str("storage"),
        }
    }
}

/// Client for the title search endpoint
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: Client,
    base_url: ServiceUrl,
    target: LookupTarget,
}

impl LookupClient {
    pub fn new(base_url: ServiceUrl, target: LookupTarget) -> Self {
        Self {
            http: Client::new(),
            base_url,
            target,
        }
    }

    pub fn target(&self) -> LookupTarget {
        self.target
    }

    /// Exact-title search; only a failed round trip is an error
    pub async fn search(&self, title: &str) -> reqwest::Result<Relayed> {
        let url = self.base_url.join(self.target.search_path());
        debug!("Looking up {:?} at {}", title, url);

        let response = self
            .http
            .get(url)
            .query(&[("title", title)])
            .send()
            .await?;

        Relayed::from_response(response).await
    }
}
