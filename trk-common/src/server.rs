//! HTTP server startup with graceful shutdown

use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::Result;

/// Bind `addr` and serve `router` until Ctrl+C or SIGTERM
pub async fn serve(router: Router, addr: SocketAddr, module: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("{} listening on http://{}", module, addr);
    info!("Health check: http://{}/health", addr);

    let name = module.to_string();
    axum::serve(listener, router.layer(TraceLayer::new_for_http()))
        .with_graceful_shutdown(async move {
            let received = wait_for_shutdown().await;
            info!("{}: received {}, draining connections", name, received);
        })
        .await?;

    info!("{} shutdown complete", module);
    Ok(())
}

/// Resolve with the name of the first shutdown signal received
///
/// A handler that cannot be installed is logged and never fires, so the
/// server keeps running on the remaining one.
async fn wait_for_shutdown() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        let terminate = async {
            match unix_signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("SIGTERM handler unavailable: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            _ = interrupt() => "Ctrl+C",
            _ = terminate => "SIGTERM",
        }
    }

    #[cfg(not(unix))]
    {
        interrupt().await;
        "Ctrl+C"
    }
}

async fn interrupt() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Ctrl+C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}
