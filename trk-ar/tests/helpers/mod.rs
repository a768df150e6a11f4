//! Test helpers: stub providers and in-process downstream services

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use trk_ar::{
    build_router, AppState, LookupClient, LookupTarget, ProviderError, RecognitionOutcome,
    RecognitionProvider,
};
use trk_common::ServiceUrl;

/// Provider answering every fragment with a fixed outcome
///
/// Records the fragments it was asked about.
pub struct StubProvider {
    answer: Result<RecognitionOutcome, u16>,
    pub seen: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn matching(title: &str) -> Arc<Self> {
        Self::answering(RecognitionOutcome::Matched {
            title: title.to_string(),
        })
    }

    pub fn answering(outcome: RecognitionOutcome) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(outcome),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Provider that fails as if it answered with a non-2xx status
    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(status),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl RecognitionProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn recognise(&self, fragment: &str) -> Result<RecognitionOutcome, ProviderError> {
        self.seen.lock().unwrap().push(fragment.to_string());
        match &self.answer {
            Ok(outcome) => Ok(outcome.clone()),
            Err(status) => Err(ProviderError::Status(*status)),
        }
    }
}

/// Serve `router` on 127.0.0.1 with an OS-assigned port
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

fn url_of(addr: SocketAddr) -> ServiceUrl {
    ServiceUrl::parse(&format!("http://{}", addr)).unwrap()
}

/// Real trk-db over an in-memory database
pub async fn spawn_storage() -> (ServiceUrl, SqlitePool) {
    let pool = trk_db::db::init_memory_pool().await.unwrap();
    let app = trk_db::build_router(trk_db::AppState::with_pool(pool.clone()));

    (url_of(spawn_router(app).await), pool)
}

/// Real trk-cm forwarding to `storage`
pub async fn spawn_catalogue(storage: ServiceUrl) -> ServiceUrl {
    let app = trk_cm::build_router(trk_cm::AppState::new(trk_cm::StorageClient::new(storage)));
    url_of(spawn_router(app).await)
}

/// URL of a port nothing is listening on
pub async fn unreachable_url() -> ServiceUrl {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    url_of(addr)
}

/// Recognition router over `provider`, looking titles up at `lookup_url`
pub fn recognition(
    provider: Arc<dyn RecognitionProvider>,
    lookup_url: ServiceUrl,
    target: LookupTarget,
) -> Router {
    build_router(AppState::new(
        provider,
        LookupClient::new(lookup_url, target),
    ))
}

/// Store a track through storage directly
pub async fn seed_track(storage: &ServiceUrl, title: &str, encoded_track: &str) {
    let response = reqwest::Client::new()
        .post(storage.join(&["db", "tracks"]))
        .json(&serde_json::json!({"title": title, "encoded_track": encoded_track}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
}
