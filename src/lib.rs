//! A greeting web service with axum.
//!
//! Serves `Hello, World!` from the root path and a personalized greeting
//! from `/greet?name=...`.

pub mod core;
pub mod feature;
pub mod infra;
pub mod server;

/// Completes when ctrl-c is pressed.
pub(crate) async fn shutdown(name: &str) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to fetch ctrl_c: {}", e);
    }
    tracing::info!("{} shutting down", name);
}
