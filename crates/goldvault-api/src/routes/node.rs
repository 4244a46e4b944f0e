//! Node status endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::dto::NodeStatusResponse;
use crate::routes::ErrorReply;
use crate::AppState;

/// Create node routes
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(get_status))
}

/// GET /node/status - Get current node status
pub async fn get_status(State(state): State<AppState>) -> Result<Json<NodeStatusResponse>, ErrorReply> {
    let config = state.config().await;

    match state.node_client().await {
        Some(client) => {
            let chain_height = client.current_height().await.ok();
            Ok(Json(NodeStatusResponse {
                connected: chain_height.is_some(),
                url: config.node.url,
                network: config.network.as_str().to_string(),
                chain_id: client.chain_id().await.ok(),
                chain_height,
                client_version: client.client_version().await,
            }))
        }
        None => Ok(Json(NodeStatusResponse {
            connected: false,
            url: config.node.url,
            network: config.network.as_str().to_string(),
            chain_id: None,
            chain_height: None,
            client_version: None,
        })),
    }
}
