//! Watched transaction endpoints

use axum::http::StatusCode;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::dto::{ApiError, TxStatusResponse, WatchedTxDto};
use crate::routes::ErrorReply;
use crate::AppState;

/// Create tx routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_watched))
        .route("/:watch_id", get(get_tx_status))
}

/// GET /tx - All watched transactions
pub async fn list_watched(State(state): State<AppState>) -> Json<Vec<WatchedTxDto>> {
    Json(state.watcher().watched_items().await)
}

/// GET /tx/{watch_id} - Lifecycle status of one watched transaction
pub async fn get_tx_status(
    State(state): State<AppState>,
    Path(watch_id): Path<String>,
) -> Result<Json<TxStatusResponse>, ErrorReply> {
    state
        .watcher()
        .status_of(&watch_id)
        .await
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::not_found(format!("No watched tx {}", watch_id))),
            )
        })
}
