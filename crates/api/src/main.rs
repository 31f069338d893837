use aama_api::{build_app, ApiConfig};
use aama_observability::init_tracing;
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("aama_api");

    let config = ApiConfig::from_env()?;
    let bind = config.bind.clone();
    let reviews_enabled = config.gateway.is_some();

    let app = build_app(config)?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, reviews_enabled, "aama daycare api started");

    axum::serve(listener, app).await?;
    Ok(())
}
