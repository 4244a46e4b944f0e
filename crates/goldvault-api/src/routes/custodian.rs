//! Custodian endpoints: owner gate and minting

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use ethers::utils::to_checksum;
use gold_token::GoldClient;
use goldvault_core::units::{format_gld, parse_address, parse_gld_amount, short_address};
use goldvault_core::TokenError;

use crate::dto::{CustodianStatusResponse, MintRequest, TxSubmitResponse};
use crate::routes::{node_unavailable, token_error_reply, tx_error_reply, wallet_required, ErrorReply};
use crate::tx_watcher::{self, TxStatus};
use crate::AppState;

/// Create custodian routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_status))
        .route("/mint", post(mint))
}

/// GET /custodian - On-chain owner vs the connected session.
///
/// The comparison is on parsed addresses, so case differences in hex
/// strings cannot defeat the gate.
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<CustodianStatusResponse>, ErrorReply> {
    let client = state.node_client().await.ok_or_else(node_unavailable)?;
    let deployment = state.deployment().await.map_err(token_error_reply)?;
    let gold = GoldClient::new(&deployment, client.provider());

    let owner = gold.owner().await.map_err(token_error_reply)?;
    let session = state.wallet().await;

    Ok(Json(CustodianStatusResponse {
        owner: to_checksum(&owner, None),
        connected_address: session.as_ref().map(|s| to_checksum(&s.address, None)),
        is_custodian: session.map(|s| s.address == owner).unwrap_or(false),
    }))
}

/// POST /custodian/mint - Mint tokens to a recipient (owner only)
///
/// Both fields are required; validation failures submit nothing. The raw
/// submission error message is returned on failure.
pub async fn mint(
    State(state): State<AppState>,
    Json(request): Json<MintRequest>,
) -> Result<Json<TxSubmitResponse>, ErrorReply> {
    let session = state.wallet().await.ok_or_else(wallet_required)?;
    let recipient = parse_address(&request.recipient).map_err(token_error_reply)?;
    let amount = parse_gld_amount(&request.amount).map_err(token_error_reply)?;

    let client = state.node_client().await.ok_or_else(node_unavailable)?;
    let deployment = state.deployment().await.map_err(token_error_reply)?;

    // Server-side counterpart of the custodian render branch: refuse before
    // submitting a transaction the contract would revert anyway.
    let owner = GoldClient::new(&deployment, client.provider())
        .owner()
        .await
        .map_err(token_error_reply)?;
    if session.address != owner {
        return Err(token_error_reply(TokenError::NotCustodian {
            address: to_checksum(&session.address, None),
        }));
    }

    let gold = GoldClient::new(&deployment, session.signer.clone());
    let tx_hash = gold.mint(recipient, amount).await.map_err(tx_error_reply)?;

    let watch_id = state
        .watcher()
        .watch(
            tx_hash,
            "mint",
            format!("Mint {} to {}", format_gld(amount), short_address(&recipient)),
        )
        .await;
    tx_watcher::ensure_poll_loop(state.clone());

    Ok(Json(TxSubmitResponse {
        watch_id,
        tx_hash: format!("{:?}", tx_hash),
        status: TxStatus::Pending,
    }))
}
