//! API route handlers

pub mod custodian;
pub mod dashboard;
pub mod health;
pub mod node;
pub mod token;
pub mod tx;
pub mod wallet;

use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use goldvault_core::{Error, TokenError, TxError};

use crate::dto::ApiError;
use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/node", node::router())
        .nest("/dashboard", dashboard::router())
        .nest("/wallet", wallet::router())
        .nest("/token", token::router())
        .nest("/custodian", custodian::router())
        .nest("/tx", tx::router())
        .with_state(state)
}

/// Standard error reply shape used by all handlers
pub(crate) type ErrorReply = (StatusCode, Json<ApiError>);

pub(crate) fn token_error_reply(e: TokenError) -> ErrorReply {
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}

pub(crate) fn tx_error_reply(e: TxError) -> ErrorReply {
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}

pub(crate) fn core_error_reply(e: Error) -> ErrorReply {
    match e {
        Error::Node(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("node_unavailable", e.to_string())),
        ),
        Error::Token(e) => token_error_reply(e),
        Error::Tx(e) => tx_error_reply(e),
        Error::Config(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::internal(msg)),
        ),
    }
}

pub(crate) fn node_unavailable() -> ErrorReply {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiError::new("node_unavailable", "Node not connected")),
    )
}

pub(crate) fn wallet_required() -> ErrorReply {
    tx_error_reply(TxError::WalletNotConnected)
}
