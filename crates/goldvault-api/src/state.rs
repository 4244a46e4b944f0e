//! Application state shared across API handlers

use std::sync::Arc;
use std::time::Instant;

use eth_node_client::{NodeClient, SignerClient};
use ethers::signers::Signer;
use ethers::types::Address;
use gold_token::Deployment;
use goldvault_core::{AppConfig, Error, Network, NodeError, TokenError, TxError};
use tokio::sync::RwLock;

use crate::tx_watcher::TxWatcherState;

/// State representing a connected wallet session.
///
/// The session wraps the configured signing key; the address is derived from
/// it. Nothing signs until a session exists.
#[derive(Clone, Debug)]
pub struct WalletSession {
    /// Address derived from the signing key
    pub address: Address,
    /// Signing client for write transactions
    pub signer: Arc<SignerClient>,
    /// When the wallet was connected
    pub connected_at: Instant,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    node_client: RwLock<Option<NodeClient>>,
    wallet: RwLock<Option<WalletSession>>,
    watcher: TxWatcherState,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                node_client: RwLock::new(None),
                wallet: RwLock::new(None),
                watcher: TxWatcherState::new(),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Get or create node client
    pub async fn node_client(&self) -> Option<NodeClient> {
        {
            let client = self.inner.node_client.read().await;
            if client.is_some() {
                return client.clone();
            }
        }

        let config = self.inner.config.read().await;
        tracing::info!("Creating node client for URL: {}", config.node.url);
        match NodeClient::new(config.node.clone()).await {
            Ok(client) => {
                let mut cached = self.inner.node_client.write().await;
                *cached = Some(client.clone());
                Some(client)
            }
            Err(e) => {
                tracing::warn!("Failed to create node client for {}: {}", config.node.url, e);
                None
            }
        }
    }

    /// Get current network
    pub async fn network(&self) -> Network {
        self.inner.config.read().await.network
    }

    /// Resolve the effective contract deployment from config
    pub async fn deployment(&self) -> Result<Deployment, TokenError> {
        let config = self.inner.config.read().await;
        Deployment::resolve(config.network, &config.contracts)
    }

    /// Get current wallet session
    pub async fn wallet(&self) -> Option<WalletSession> {
        self.inner.wallet.read().await.clone()
    }

    /// Attach the configured signing key as the active wallet session.
    ///
    /// # Errors
    /// Fails when no key is configured, the key is malformed, or the node is
    /// unreachable (the signer is pinned to the node's chain id).
    pub async fn connect_wallet(&self) -> Result<WalletSession, Error> {
        let config = self.inner.config.read().await;
        let key = config
            .wallet
            .private_key
            .clone()
            .ok_or(TxError::NoSigningKey)?;
        let url = config.node.url.clone();
        drop(config);

        let client = self
            .node_client()
            .await
            .ok_or(NodeError::Unreachable { url })?;

        let signer = client.signer(&key).await?;
        let session = WalletSession {
            address: signer.signer().address(),
            signer,
            connected_at: Instant::now(),
        };

        tracing::info!("Wallet connected: {:?}", session.address);
        let mut wallet = self.inner.wallet.write().await;
        *wallet = Some(session.clone());
        Ok(session)
    }

    /// Disconnect wallet (clear wallet session)
    pub async fn disconnect_wallet(&self) {
        let mut wallet = self.inner.wallet.write().await;
        if wallet.take().is_some() {
            tracing::info!("Wallet disconnected");
        }
    }

    /// The background transaction watcher
    pub fn watcher(&self) -> &TxWatcherState {
        &self.inner.watcher
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wallet_starts_disconnected() {
        let state = AppState::new();
        assert!(state.wallet().await.is_none());
    }

    #[tokio::test]
    async fn test_connect_without_key_fails() {
        let state = AppState::new();
        let err = state.connect_wallet().await.unwrap_err();
        assert!(matches!(err, Error::Tx(TxError::NoSigningKey)));
    }

    #[tokio::test]
    async fn test_deployment_resolves_from_config() {
        let state = AppState::new();
        // Default config is sepolia, which has a known deployment
        assert!(state.deployment().await.is_ok());
    }
}
