//! Liveness endpoint

use axum::extract::State;
use axum::Json;

use crate::dto::HealthResponse;
use crate::AppState;

/// GET /health - Liveness plus the network this instance serves
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::for_network(state.network().await))
}
