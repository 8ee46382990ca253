use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;

/// Hosting platforms ping this to keep the process alive.
pub fn router() -> Router {
    Router::new().route("/", get(|| async { "OK" }))
}

pub async fn serve(port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind keep-alive server to port {port}"))?;
    tracing::info!(port, "Keep-alive server listening");
    axum::serve(listener, router()).await.context("Keep-alive server stopped")
}
