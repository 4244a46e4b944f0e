//! Typed facade over the oracle and token contracts

use std::sync::Arc;

use ethers::contract::ContractError;
use ethers::providers::Middleware;
use ethers::types::{Address, TxHash, I256, U256};
use goldvault_core::{TokenError, TxError};

use crate::bindings::{GoldPriceOracle, GoldToken};
use crate::deployments::Deployment;

/// Client for the Gold Token deployment.
///
/// Generic over the middleware so the same type serves read-only queries
/// (plain provider) and write submissions (signer middleware).
#[derive(Clone)]
pub struct GoldClient<M> {
    oracle: GoldPriceOracle<M>,
    token: GoldToken<M>,
}

impl<M: Middleware + 'static> GoldClient<M> {
    pub fn new(deployment: &Deployment, client: Arc<M>) -> Self {
        Self {
            oracle: GoldPriceOracle::new(deployment.oracle, client.clone()),
            token: GoldToken::new(deployment.token, client),
        }
    }

    /// Oracle contract address
    pub fn oracle_address(&self) -> Address {
        self.oracle.address()
    }

    /// Token contract address
    pub fn token_address(&self) -> Address {
        self.token.address()
    }

    /// Latest oracle price, 8-decimal fixed point
    pub async fn latest_price(&self) -> Result<i128, TokenError> {
        let price: I256 = self
            .oracle
            .get_latest_price()
            .call()
            .await
            .map_err(read_error)?;

        i128::try_from(price).map_err(|_| TokenError::StateUnavailable {
            reason: "oracle price out of i128 range".to_string(),
        })
    }

    /// Total token supply in base units
    pub async fn total_supply(&self) -> Result<U256, TokenError> {
        self.token.total_supply().call().await.map_err(read_error)
    }

    /// Token balance of an address, in base units
    pub async fn balance_of(&self, account: Address) -> Result<U256, TokenError> {
        self.token.balance_of(account).call().await.map_err(read_error)
    }

    /// The account authorized to mint
    pub async fn owner(&self) -> Result<Address, TokenError> {
        self.token.owner().call().await.map_err(read_error)
    }

    /// Submit a withdraw transaction. Returns the transaction hash; receipt
    /// tracking is the watcher's job.
    pub async fn withdraw(&self, amount: U256) -> Result<TxHash, TxError> {
        let call = self.token.withdraw(amount);
        let pending = call.send().await.map_err(submit_error)?;
        let hash = *pending;
        tracing::info!("Submitted withdraw of {} base units: {:?}", amount, hash);
        Ok(hash)
    }

    /// Submit a mint transaction for the custodian
    pub async fn mint(&self, to: Address, amount: U256) -> Result<TxHash, TxError> {
        let call = self.token.mint(to, amount);
        let pending = call.send().await.map_err(submit_error)?;
        let hash = *pending;
        tracing::info!("Submitted mint of {} base units to {:?}: {:?}", amount, to, hash);
        Ok(hash)
    }
}

fn read_error<M: Middleware>(e: ContractError<M>) -> TokenError {
    TokenError::StateUnavailable {
        reason: e.to_string(),
    }
}

fn submit_error<M: Middleware>(e: ContractError<M>) -> TxError {
    TxError::SubmissionFailed {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eth_node_client::NodeClient;
    use goldvault_core::{Network, NodeConfig};

    #[test]
    fn test_client_binds_deployment_addresses() {
        let node = NodeClient::new_without_probe(NodeConfig::default()).unwrap();
        let deployment = Deployment::for_network(Network::Sepolia).unwrap();
        let client = GoldClient::new(&deployment, node.provider());

        assert_eq!(client.oracle_address(), deployment.oracle);
        assert_eq!(client.token_address(), deployment.token);
    }
}
