mod config;
mod routes;

use std::sync::Arc;

use seqpng_core::Engine;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env()?;

    // font discovery is slow; do it once before accepting requests
    let engine = tokio::task::spawn_blocking(Engine::new).await?;
    let app = routes::app(Arc::new(engine), &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, max_body_bytes = config.max_body_bytes, "seqpng listening");
    axum::serve(listener, app).await?;
    Ok(())
}
