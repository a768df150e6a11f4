//! Test helpers: in-process downstream services on ephemeral ports

#![allow(dead_code)]

use axum::Router;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use trk_common::ServiceUrl;

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

/// Start a real trk-db over an in-memory database
///
/// The pool is returned so tests can close it to simulate a storage fault.
pub async fn spawn_storage() -> (ServiceUrl, SqlitePool) {
    let pool = trk_db::db::init_memory_pool().await.unwrap();
    let app = trk_db::build_router(trk_db::AppState::with_pool(pool.clone()));
    let addr = spawn_router(app).await;

    (ServiceUrl::parse(&format!("http://{}", addr)).unwrap(), pool)
}

/// URL of a port nothing is listening on
pub async fn unreachable_url() -> ServiceUrl {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    ServiceUrl::parse(&format!("http://{}", addr)).unwrap()
}
