//! Wallet session endpoints
//!
//! Every per-wallet read and every write elsewhere in the API is gated on a
//! session existing here.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use ethers::utils::to_checksum;
use gold_token::GoldClient;
use goldvault_core::units::{format_gld, short_address};

use crate::dto::{WalletInfoResponse, WalletStatusResponse};
use crate::routes::{
    core_error_reply, node_unavailable, token_error_reply, wallet_required, ErrorReply,
};
use crate::AppState;

/// Create wallet routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
        .route("/status", get(get_status))
        .route("/info", get(get_info))
}

/// POST /wallet/connect - Attach the configured signing key as the session
pub async fn connect(State(state): State<AppState>) -> Result<Json<WalletStatusResponse>, ErrorReply> {
    let session = state.connect_wallet().await.map_err(core_error_reply)?;
    Ok(Json(WalletStatusResponse {
        connected: true,
        address: Some(to_checksum(&session.address, None)),
    }))
}

/// POST /wallet/disconnect - Clear the session
pub async fn disconnect(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    state.disconnect_wallet().await;
    Json(WalletStatusResponse {
        connected: false,
        address: None,
    })
}

/// GET /wallet/status - Session state
pub async fn get_status(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    match state.wallet().await {
        Some(session) => Json(WalletStatusResponse {
            connected: true,
            address: Some(to_checksum(&session.address, None)),
        }),
        None => Json(WalletStatusResponse {
            connected: false,
            address: None,
        }),
    }
}

/// GET /wallet/info - Address forms and token balance for the session
pub async fn get_info(State(state): State<AppState>) -> Result<Json<WalletInfoResponse>, ErrorReply> {
    let session = state.wallet().await.ok_or_else(wallet_required)?;
    let client = state.node_client().await.ok_or_else(node_unavailable)?;
    let deployment = state.deployment().await.map_err(token_error_reply)?;
    let gold = GoldClient::new(&deployment, client.provider());

    let balance = gold
        .balance_of(session.address)
        .await
        .map_err(token_error_reply)?;

    Ok(Json(WalletInfoResponse {
        address: to_checksum(&session.address, None),
        address_short: short_address(&session.address),
        balance_base: balance.to_string(),
        balance_formatted: format_gld(balance),
    }))
}
