//! Live contract data endpoint: oracle price and token supply

use axum::{extract::State, routing::get, Json, Router};
use ethers::utils::to_checksum;
use gold_token::GoldClient;
use goldvault_core::units::{format_gld, format_usd_price};

use crate::dto::ContractDataResponse;
use crate::routes::{node_unavailable, token_error_reply, ErrorReply};
use crate::AppState;

/// Create dashboard routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_contract_data))
}

/// GET /dashboard - Oracle price and total supply, raw and formatted
pub async fn get_contract_data(
    State(state): State<AppState>,
) -> Result<Json<ContractDataResponse>, ErrorReply> {
    let client = state.node_client().await.ok_or_else(node_unavailable)?;
    let deployment = state.deployment().await.map_err(token_error_reply)?;
    let gold = GoldClient::new(&deployment, client.provider());

    let price = gold.latest_price().await.map_err(token_error_reply)?;
    let supply = gold.total_supply().await.map_err(token_error_reply)?;

    Ok(Json(ContractDataResponse {
        price_raw: price.to_string(),
        price_formatted: format_usd_price(price),
        total_supply_base: supply.to_string(),
        total_supply_formatted: format_gld(supply),
        oracle_address: to_checksum(&deployment.oracle, None),
        token_address: to_checksum(&deployment.token, None),
    }))
}
