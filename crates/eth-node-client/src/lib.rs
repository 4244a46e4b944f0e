//! eth-node-client: Wrapper around the ethers JSON-RPC provider
//!
//! This crate provides a high-level client for talking to an Ethereum node,
//! including connectivity probing, request timeouts, and signer construction
//! for write transactions.

use std::sync::Arc;
use std::time::Duration;

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Transaction, TransactionReceipt, TxHash};
use goldvault_core::{BlockHeight, NodeConfig, NodeError, TxError};
use tokio::sync::RwLock;

/// Default timeout for node RPC calls (30 seconds).
/// Long enough for slow nodes, short enough to avoid perpetual spinners.
const NODE_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only provider over HTTP
pub type ReadProvider = Provider<Http>;

/// Provider with an attached signing key, for write transactions
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Result type for node client operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// High-level Ethereum node client
#[derive(Clone)]
pub struct NodeClient {
    provider: Arc<ReadProvider>,
    chain_id: Arc<RwLock<Option<u64>>>,
    config: NodeConfig,
}

impl NodeClient {
    /// Create a new node client and probe the node for its chain id
    pub async fn new(config: NodeConfig) -> Result<Self> {
        let client = Self::new_without_probe(config)?;

        let chain_id = client.fetch_chain_id().await?;
        tracing::info!("Connected to node at {} (chain id {})", client.config.url, chain_id);

        let mut lock = client.chain_id.write().await;
        *lock = Some(chain_id);
        drop(lock);

        Ok(client)
    }

    /// Create without probing (for testing or when the node may be offline)
    pub fn new_without_probe(config: NodeConfig) -> Result<Self> {
        let provider = build_provider(&config)?;
        Ok(Self {
            provider: Arc::new(provider),
            chain_id: Arc::new(RwLock::new(None)),
            config,
        })
    }

    /// Get the underlying provider (for contract bindings)
    pub fn provider(&self) -> Arc<ReadProvider> {
        self.provider.clone()
    }

    /// Get the current node configuration
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Get the node's chain id, cached after the first successful query
    pub async fn chain_id(&self) -> Result<u64> {
        {
            let lock = self.chain_id.read().await;
            if let Some(id) = *lock {
                return Ok(id);
            }
        }

        let id = self.fetch_chain_id().await?;
        let mut lock = self.chain_id.write().await;
        *lock = Some(id);
        Ok(id)
    }

    /// Get current block height
    pub async fn current_height(&self) -> Result<BlockHeight> {
        let block = timed_request(self.provider.get_block_number()).await?;
        Ok(block.as_u64())
    }

    /// Check if node is reachable
    pub async fn is_online(&self) -> bool {
        timed_request(self.provider.get_block_number()).await.is_ok()
    }

    /// Get the node's client version string (e.g. "Geth/v1.13...")
    pub async fn client_version(&self) -> Option<String> {
        timed_request(self.provider.client_version()).await.ok()
    }

    /// Get the receipt for a transaction, if mined
    pub async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        timed_request(self.provider.get_transaction_receipt(hash)).await
    }

    /// Get a transaction by hash. `None` means the node does not know the
    /// hash at all (not mined, not in the mempool).
    pub async fn transaction_by_hash(&self, hash: TxHash) -> Result<Option<Transaction>> {
        timed_request(self.provider.get_transaction(hash)).await
    }

    /// Build a signing client from a hex private key.
    ///
    /// The signer is pinned to the node's chain id so transactions cannot be
    /// replayed across networks.
    pub async fn signer(
        &self,
        private_key: &str,
    ) -> std::result::Result<Arc<SignerClient>, goldvault_core::Error> {
        let wallet = normalize_key(private_key)
            .parse::<LocalWallet>()
            .map_err(|e| TxError::InvalidKey {
                reason: e.to_string(),
            })?;

        let chain_id = self.chain_id().await?;
        let wallet = wallet.with_chain_id(chain_id);

        Ok(Arc::new(SignerMiddleware::new(
            (*self.provider).clone(),
            wallet,
        )))
    }

    async fn fetch_chain_id(&self) -> Result<u64> {
        let id = timed_request(self.provider.get_chainid())
            .await
            .map_err(|e| NodeError::Unreachable {
                url: format!("{}: {}", self.config.url, e),
            })?;
        Ok(id.as_u64())
    }
}

/// Construct the HTTP provider with the configured polling interval
fn build_provider(config: &NodeConfig) -> Result<ReadProvider> {
    Provider::<Http>::try_from(config.url.as_str())
        .map(|p| p.interval(Duration::from_millis(config.poll_interval_ms)))
        .map_err(|e| NodeError::Unreachable {
            url: format!("{}: {}", config.url, e),
        })
}

/// Strip an optional 0x prefix from a hex key
fn normalize_key(key: &str) -> &str {
    let key = key.trim();
    key.strip_prefix("0x").unwrap_or(key)
}

/// Wrap a node RPC call with a timeout. Converts both timeout and RPC errors
/// to NodeError.
async fn timed_request<T, E: std::fmt::Display>(
    fut: impl std::future::Future<Output = std::result::Result<T, E>>,
) -> Result<T> {
    tokio::time::timeout(NODE_REQUEST_TIMEOUT, fut)
        .await
        .map_err(|_| NodeError::Timeout {
            secs: NODE_REQUEST_TIMEOUT.as_secs(),
        })?
        .map_err(|e| NodeError::Rpc {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.url, "http://127.0.0.1:8545");
    }

    #[test]
    fn test_build_provider() {
        assert!(build_provider(&NodeConfig::default()).is_ok());

        let bad = NodeConfig {
            url: "not a url".to_string(),
            ..NodeConfig::default()
        };
        assert!(build_provider(&bad).is_err());
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("0xdeadbeef"), "deadbeef");
        assert_eq!(normalize_key("deadbeef"), "deadbeef");
        assert_eq!(normalize_key("  0xdeadbeef  "), "deadbeef");
    }

    #[test]
    fn test_new_without_probe() {
        let client = NodeClient::new_without_probe(NodeConfig::default()).unwrap();
        assert_eq!(client.config().url, "http://127.0.0.1:8545");
    }
}
