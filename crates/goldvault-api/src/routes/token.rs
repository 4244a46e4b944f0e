//! Token write endpoint: withdraw

use axum::{extract::State, routing::post, Json, Router};
use gold_token::GoldClient;
use goldvault_core::units::{format_gld, parse_gld_amount};

use crate::dto::{TxSubmitResponse, WithdrawRequest};
use crate::routes::{token_error_reply, tx_error_reply, wallet_required, ErrorReply};
use crate::tx_watcher::{self, TxStatus};
use crate::AppState;

/// Create token routes
pub fn router() -> Router<AppState> {
    Router::new().route("/withdraw", post(withdraw))
}

/// POST /token/withdraw - Submit a withdraw transaction
///
/// The amount arrives as a decimal string and is converted to base units
/// here, once. Validation failures submit nothing.
pub async fn withdraw(
    State(state): State<AppState>,
    Json(request): Json<WithdrawRequest>,
) -> Result<Json<TxSubmitResponse>, ErrorReply> {
    let session = state.wallet().await.ok_or_else(wallet_required)?;
    let amount = parse_gld_amount(&request.amount).map_err(token_error_reply)?;

    let deployment = state.deployment().await.map_err(token_error_reply)?;
    let gold = GoldClient::new(&deployment, session.signer.clone());

    let tx_hash = gold.withdraw(amount).await.map_err(tx_error_reply)?;

    let watch_id = state
        .watcher()
        .watch(tx_hash, "withdraw", format!("Withdraw {}", format_gld(amount)))
        .await;
    tx_watcher::ensure_poll_loop(state.clone());

    Ok(Json(TxSubmitResponse {
        watch_id,
        tx_hash: format!("{:?}", tx_hash),
        status: TxStatus::Pending,
    }))
}
