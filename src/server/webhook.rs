//! The Telegram webhook endpoint.
//!
//! The platform expects an acknowledgement for every delivered update,
//! so business-rule refusals (no message, unauthorized sender) still
//! answer 200; only malformed JSON (rejected by the extractor) and
//! unexpected internal errors escape that rule.

use crate::core::admin;
use crate::server::AppState;
use crate::server::response::{ApiResponse, acknowledged, failed, rejected, success};
use crate::telegram::{api::Update, dispatch};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tracing::{error, info, warn};

const NOT_AUTHORIZED_REPLY: &str = "You are not authorized to manage the catalog.";
const PROCESSING_ERROR_REPLY: &str = "Something went wrong while processing your command.";

/// `GET /telegram-webhook` - static liveness payload for manual checks.
pub async fn liveness() -> (StatusCode, Json<ApiResponse>) {
    success(json!({ "message": "Webhook endpoint is up" }))
}

/// `POST /telegram-webhook` - receives one platform update.
pub async fn receive(
    State(state): State<AppState>,
    Json(update): Json<Update>,
) -> (StatusCode, Json<ApiResponse>) {
    let Some(message) = update.message else {
        return rejected("no message");
    };

    // Senderless messages (channel posts) cannot be authorized
    let Some(from) = message.from else {
        return rejected("unauthorized");
    };

    match admin::is_authorized(&state.db, from.id).await {
        Ok(true) => {}
        Ok(false) => {
            info!("Rejected command from unauthorized user {}", from.id);
            if let Err(e) = state.notifier.send(NOT_AUTHORIZED_REPLY).await {
                warn!("Failed to send authorization notice: {e}");
            }
            return rejected("unauthorized");
        }
        Err(e) => {
            error!("Allow-list lookup failed: {e}");
            if let Err(e) = state.notifier.send(PROCESSING_ERROR_REPLY).await {
                warn!("Failed to send error notice: {e}");
            }
            return failed("error processing command");
        }
    }

    // Non-text updates (stickers, photos) are acknowledged without action
    let Some(text) = message.text else {
        return acknowledged();
    };

    let reply = dispatch::handle(&state.db, &text).await;
    if let Err(e) = state.notifier.send(&reply).await {
        warn!("Failed to send command reply: {e}");
    }

    success(json!(reply))
}
