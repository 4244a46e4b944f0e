//! Configuration types for Goldvault

use serde::{Deserialize, Serialize};

use crate::Network;

/// Node connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// JSON-RPC URL (e.g., "http://127.0.0.1:8545")
    pub url: String,

    /// Provider polling interval for pending state, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Wallet signing configuration
///
/// The key is attached as the active session via the wallet endpoints; it is
/// never used before an explicit connect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Hex-encoded secp256k1 private key, with or without 0x prefix
    #[serde(default)]
    pub private_key: Option<String>,
}

/// Contract address overrides
///
/// When unset, the per-network deployment constants apply. Overrides exist
/// to reach alternate deployments of the same contracts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// Price oracle contract address override
    #[serde(default)]
    pub oracle: Option<String>,

    /// Token contract address override
    #[serde(default)]
    pub token: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Node connection settings
    pub node: NodeConfig,

    /// Network (mainnet or sepolia)
    pub network: Network,

    /// Wallet signing settings
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Contract address overrides
    #[serde(default)]
    pub contracts: ContractsConfig,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_port() -> u16 {
    18545
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            network: Network::Sepolia,
            wallet: WalletConfig::default(),
            contracts: ContractsConfig::default(),
            api_port: default_api_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.node.url, "http://127.0.0.1:8545");
        assert_eq!(config.network, Network::Sepolia);
        assert_eq!(config.api_port, 18545);
        assert!(config.wallet.private_key.is_none());
        assert!(config.contracts.oracle.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.node.url, config.node.url);
        assert_eq!(parsed.network, config.network);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{"node": {"url": "http://10.0.0.5:8545"}, "network": "mainnet"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.node.url, "http://10.0.0.5:8545");
        assert_eq!(parsed.node.poll_interval_ms, 2_000);
        assert_eq!(parsed.network, Network::Mainnet);
        assert_eq!(parsed.api_port, 18545);
    }
}
