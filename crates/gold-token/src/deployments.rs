//! Contract deployment addresses
//!
//! Addresses are per-network constants with config-level overrides. The
//! original deployment history left a second, superseded address pair behind;
//! that pair is only reachable through an explicit override, never selected
//! by default.

use ethers::types::Address;
use goldvault_core::units::parse_address;
use goldvault_core::{ContractsConfig, Network, TokenError};

/// Sepolia deployment (current)
pub mod sepolia {
    /// GoldPriceOracle contract
    pub const ORACLE: &str = "0x64610889372d06f8E9761B0eeB77b3A3e2880AeE";

    /// GoldToken contract
    pub const TOKEN: &str = "0x7BA1ce81eC8D4c3c7565b0B3de0F8100f8455fdD";
}

/// Contract addresses for a specific deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub oracle: Address,
    pub token: Address,
}

impl Deployment {
    /// Get the default deployment for a network
    pub fn for_network(network: Network) -> Option<Self> {
        match network {
            Network::Sepolia => Self::from_strs(sepolia::ORACLE, sepolia::TOKEN).ok(),
            Network::Mainnet => {
                // Mainnet not deployed
                None
            }
        }
    }

    /// Build a deployment from address strings
    pub fn from_strs(oracle: &str, token: &str) -> Result<Self, TokenError> {
        Ok(Self {
            oracle: parse_address(oracle)?,
            token: parse_address(token)?,
        })
    }

    /// Resolve the effective deployment for a network, applying config
    /// overrides field by field.
    pub fn resolve(network: Network, overrides: &ContractsConfig) -> Result<Self, TokenError> {
        let base = Self::for_network(network);

        let oracle = match &overrides.oracle {
            Some(addr) => parse_address(addr)?,
            None => {
                base.map(|d| d.oracle).ok_or_else(|| TokenError::NoDeployment {
                    network: network.to_string(),
                })?
            }
        };

        let token = match &overrides.token {
            Some(addr) => parse_address(addr)?,
            None => {
                base.map(|d| d.token).ok_or_else(|| TokenError::NoDeployment {
                    network: network.to_string(),
                })?
            }
        };

        Ok(Self { oracle, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sepolia_constants() {
        let deployment = Deployment::for_network(Network::Sepolia).unwrap();
        assert_ne!(deployment.oracle, deployment.token);
        assert_ne!(deployment.oracle, Address::zero());
    }

    #[test]
    fn test_mainnet_not_deployed() {
        assert!(Deployment::for_network(Network::Mainnet).is_none());
    }

    #[test]
    fn test_resolve_defaults() {
        let overrides = ContractsConfig::default();
        let deployment = Deployment::resolve(Network::Sepolia, &overrides).unwrap();
        assert_eq!(deployment, Deployment::for_network(Network::Sepolia).unwrap());
    }

    #[test]
    fn test_resolve_with_override() {
        let overrides = ContractsConfig {
            oracle: Some("0x0000000000000000000000000000000000000001".to_string()),
            token: None,
        };
        let deployment = Deployment::resolve(Network::Sepolia, &overrides).unwrap();
        assert_eq!(deployment.oracle, Address::from_low_u64_be(1));
        assert_eq!(
            deployment.token,
            Deployment::for_network(Network::Sepolia).unwrap().token
        );
    }

    #[test]
    fn test_resolve_mainnet_requires_overrides() {
        let err = Deployment::resolve(Network::Mainnet, &ContractsConfig::default());
        assert!(err.is_err());

        let overrides = ContractsConfig {
            oracle: Some("0x0000000000000000000000000000000000000001".to_string()),
            token: Some("0x0000000000000000000000000000000000000002".to_string()),
        };
        assert!(Deployment::resolve(Network::Mainnet, &overrides).is_ok());
    }

    #[test]
    fn test_resolve_rejects_bad_override() {
        let overrides = ContractsConfig {
            oracle: Some("nonsense".to_string()),
            token: None,
        };
        assert!(Deployment::resolve(Network::Sepolia, &overrides).is_err());
    }
}
