use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cityscout::api::AppState;
use cityscout::config::AppConfig;
use cityscout::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cityscout=info,tower_http=warn")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, suggestion lists will be empty");
    }
    if config.gmap_api_key.is_none() {
        tracing::warn!("GMAP_API_KEY is not set, coordinates will be absent");
    }

    web::run(Arc::new(AppState::new(config))).await
}
