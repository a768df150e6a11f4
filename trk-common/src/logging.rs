//! Tracing subscriber setup shared by the service binaries

/// Install the global fmt subscriber
///
/// Honours `RUST_LOG`; anything not covered there logs at INFO and above.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}
