//! goldvault-api: HTTP API layer for Goldvault
//!
//! Exposes the dashboard, wallet, withdraw, and custodian surfaces over
//! axum, plus the background transaction watcher.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;
pub mod tx_watcher;

pub use server::{create_app, start_server};
pub use state::AppState;
