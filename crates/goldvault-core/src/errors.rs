//! Error types for Goldvault

use thiserror::Error;

/// Core errors that can occur in Goldvault
#[derive(Debug, Error)]
pub enum Error {
    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Transaction error: {0}")]
    Tx(#[from] TxError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Node connection and RPC errors
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Node unreachable at {url}")]
    Unreachable { url: String },

    #[error("RPC request failed: {message}")]
    Rpc { message: String },

    #[error("Node request timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Contract read and input validation errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("Not the custodian: {address}")]
    NotCustodian { address: String },

    #[error("No deployment known for {network}")]
    NoDeployment { network: String },

    #[error("Contract state unavailable: {reason}")]
    StateUnavailable { reason: String },
}

/// Transaction submission and tracking errors
#[derive(Debug, Error)]
pub enum TxError {
    #[error("No wallet connected")]
    WalletNotConnected,

    #[error("No signing key configured")]
    NoSigningKey,

    #[error("Invalid signing key: {reason}")]
    InvalidKey { reason: String },

    #[error("Transaction submission failed: {message}")]
    SubmissionFailed { message: String },
}

/// Result type alias for Goldvault operations
pub type Result<T> = std::result::Result<T, Error>;

impl TokenError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InvalidAddress { .. } => "invalid_address",
            Self::NotCustodian { .. } => "not_custodian",
            Self::NoDeployment { .. } => "no_deployment",
            Self::StateUnavailable { .. } => "state_unavailable",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } | Self::InvalidAddress { .. } => 400,
            Self::NotCustodian { .. } => 403,
            Self::NoDeployment { .. } => 422,
            Self::StateUnavailable { .. } => 503,
        }
    }
}

impl TxError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WalletNotConnected => "wallet_not_connected",
            Self::NoSigningKey => "no_signing_key",
            Self::InvalidKey { .. } => "invalid_key",
            Self::SubmissionFailed { .. } => "submission_failed",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::WalletNotConnected => 401,
            Self::NoSigningKey | Self::InvalidKey { .. } => 422,
            Self::SubmissionFailed { .. } => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_codes() {
        let err = TokenError::InvalidAmount {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_amount");
        assert_eq!(err.status_code(), 400);

        let err = TokenError::NotCustodian {
            address: "0xabc".into(),
        };
        assert_eq!(err.error_code(), "not_custodian");
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_tx_error_codes() {
        assert_eq!(TxError::WalletNotConnected.error_code(), "wallet_not_connected");
        assert_eq!(TxError::WalletNotConnected.status_code(), 401);

        let err = TxError::SubmissionFailed {
            message: "reverted".into(),
        };
        assert_eq!(err.error_code(), "submission_failed");
        assert_eq!(err.status_code(), 502);
    }
}
