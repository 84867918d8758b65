use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mindlens_core::upstream::ZaiClient;
use mindlens_gateway::auth::TokenService;
use mindlens_gateway::config::Config;
use mindlens_gateway::store::MemoryStore;
use mindlens_gateway::{cors_layer, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if config.zai_api_key.is_empty() {
        tracing::warn!("ZAI_API_KEY is not set; upstream calls will be rejected");
    }

    let model = ZaiClient::new(config.zai_api_key.clone(), config.zai_base_url.clone())?;

    let state = Arc::new(AppState {
        store: Arc::new(MemoryStore::new()),
        tokens: TokenService::new(config.jwt_secret.clone()),
        model: Arc::new(model),
    });

    let cors = cors_layer(&config.frontend_url)
        .with_context(|| format!("invalid FRONTEND_URL {:?}", config.frontend_url))?;

    let app = router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("MindLens gateway listening on {}", addr);
    info!("allowed origin: {}", config.frontend_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
