//! Goldvault server binary
//!
//! Loads configuration (optional JSON path as the first argument), then
//! serves the API.

use anyhow::Context;
use goldvault_api::AppState;
use goldvault_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("goldvault=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    let config = load_config()?;
    tracing::info!(
        "Starting goldvault: node {} on {}",
        config.node.url,
        config.network
    );
    if config.wallet.private_key.is_some() {
        tracing::info!("Signing key configured; POST /wallet/connect to attach it");
    }

    let port = config.api_port;
    let state = AppState::with_config(config);

    goldvault_api::start_server(state, port)
        .await
        .context("API server failed")?;

    Ok(())
}

fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path))?;
            let config = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file {}", path))?;
            Ok(config)
        }
        None => Ok(AppConfig::default()),
    }
}
