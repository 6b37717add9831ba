//! HTTP layer - router, shared state and the server loop.

/// Catalog read endpoints
pub mod catalog;
/// Checkout endpoint
pub mod orders;
/// Response envelope
pub mod response;
/// Telegram webhook endpoint
pub mod webhook;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::telegram::notifier::Notify;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store connection
    pub db: Arc<DatabaseConnection>,
    /// Outbound notification seam
    pub notifier: Arc<dyn Notify>,
    /// Resolved application configuration
    pub config: Arc<AppConfig>,
}

/// Assembles the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(catalog::list_products))
        .route("/categories", get(catalog::list_categories))
        .route("/tags", get(catalog::list_tags))
        .route("/orders", post(orders::submit))
        .route(
            "/telegram-webhook",
            get(webhook::liveness).post(webhook::receive),
        )
        .with_state(state)
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Binds the listener and serves until SIGINT/SIGTERM.
///
/// # Errors
/// Returns an error if binding or serving fails.
pub async fn run_server(state: AppState, bind_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on {bind_addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => tracing::error!("Failed to install signal handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
