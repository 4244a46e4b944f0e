//! Server assembly: middleware stack and listener for the goldvault API

use std::net::SocketAddr;

use axum::http::Method;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::create_router;
use crate::AppState;

/// Build the goldvault application router with its middleware stack.
///
/// The browser dashboard calls this API cross-origin during development, so
/// origins stay open while methods are pinned to the verbs the routes serve.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve the goldvault API on the loopback interface.
///
/// The service carries a signing key in its state, so it never binds beyond
/// localhost. Shuts down cleanly on ctrl-c.
pub async fn start_server(state: AppState, port: u16) -> Result<(), std::io::Error> {
    let app = create_app(state);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("Goldvault API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("Failed to install ctrl-c handler; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_app_serves_health() {
        let app = create_app(AppState::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_node_reconfiguration_not_exposed() {
        let app = create_app(AppState::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/node/configure")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
