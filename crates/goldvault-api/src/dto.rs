//! Data Transfer Objects for API requests and responses

use goldvault_core::Network;
use serde::{Deserialize, Serialize};

use crate::tx_watcher::TxStatus;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Network this instance is configured against
    pub network: String,
}

impl HealthResponse {
    pub fn for_network(network: Network) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            network: network.as_str().to_string(),
        }
    }
}

/// Node status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatusResponse {
    pub connected: bool,
    pub url: String,
    pub network: String,
    pub chain_id: Option<u64>,
    pub chain_height: Option<u64>,
    pub client_version: Option<String>,
}

/// Live contract data: oracle price and token supply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDataResponse {
    /// Raw oracle answer, 8-decimal fixed point
    pub price_raw: String,
    /// Price as a dollar string, e.g. "$2500.00"
    pub price_formatted: String,
    /// Total supply in base units
    pub total_supply_base: String,
    /// Supply as a decimal string with symbol, e.g. "1.5 GLD"
    pub total_supply_formatted: String,
    /// Oracle contract address (checksummed)
    pub oracle_address: String,
    /// Token contract address (checksummed)
    pub token_address: String,
}

/// Wallet session status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletStatusResponse {
    pub connected: bool,
    /// Checksummed session address; only set when connected
    pub address: Option<String>,
}

/// Per-wallet view: address forms and token balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletInfoResponse {
    /// Checksummed address
    pub address: String,
    /// Truncated form, first 6 chars + "..." + last 4
    pub address_short: String,
    /// Balance in base units
    pub balance_base: String,
    /// Balance as a decimal string with symbol
    pub balance_formatted: String,
}

/// Withdraw request. The amount is a decimal string in GLD units; conversion
/// to base units happens exactly once, here on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub amount: String,
}

/// Mint request (custodian only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequest {
    pub recipient: String,
    pub amount: String,
}

/// Custodian gate: on-chain owner vs the connected session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodianStatusResponse {
    /// Checksummed owner address from the contract
    pub owner: String,
    /// Checksummed session address, when a wallet is connected
    pub connected_address: Option<String>,
    /// True iff the session address equals the owner
    pub is_custodian: bool,
}

/// Response for a submitted write transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxSubmitResponse {
    /// Watcher id for status polling
    pub watch_id: String,
    /// Transaction hash
    pub tx_hash: String,
    pub status: TxStatus,
}

/// Status of a single watched transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxStatusResponse {
    pub watch_id: String,
    pub tx_hash: String,
    pub status: TxStatus,
    pub error: Option<String>,
}

/// A watched transaction with display metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchedTxDto {
    pub watch_id: String,
    pub tx_hash: String,
    /// "withdraw" | "mint"
    pub operation: String,
    pub description: String,
    pub status: TxStatus,
    pub error: Option<String>,
    pub elapsed_secs: u64,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_reports_network() {
        let health = HealthResponse::for_network(Network::Sepolia);
        assert_eq!(health.status, "ok");
        assert_eq!(health.network, "sepolia");
        assert!(!health.version.is_empty());
    }

    #[test]
    fn test_submit_response_serialization() {
        let resp = TxSubmitResponse {
            watch_id: "w1".to_string(),
            tx_hash: "0xabc".to_string(),
            status: TxStatus::Pending,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_withdraw_request_deserialization() {
        let req: WithdrawRequest = serde_json::from_str(r#"{"amount": "1.5"}"#).unwrap();
        assert_eq!(req.amount, "1.5");
    }
}
