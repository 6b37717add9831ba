//! The uniform `{ok, result?, error?}` response envelope.
//!
//! One contract across the webhook and the storefront API: structural
//! failures keep a non-2xx status, business-rule failures acknowledge
//! with 200 and `ok: false`, unhandled internal errors are 500 with
//! `ok: false`.

use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// JSON body returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the request achieved its business outcome
    pub ok: bool,
    /// Payload on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Short, user-facing failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 200 with `ok: true` and a result payload.
pub fn success<T: Serialize>(result: T) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            ok: true,
            result: Some(serde_json::to_value(result).unwrap_or_default()),
            error: None,
        }),
    )
}

/// 200 with `ok: true` and no payload (acknowledged, nothing to do).
#[must_use]
pub fn acknowledged() -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            ok: true,
            result: None,
            error: None,
        }),
    )
}

/// 200 with `ok: false`: the request was understood but refused by a
/// business rule.
pub fn rejected(error: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            ok: false,
            result: None,
            error: Some(error.into()),
        }),
    )
}

/// 500 with `ok: false`: something unexpected went wrong.
pub fn failed(error: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse {
            ok: false,
            result: None,
            error: Some(error.into()),
        }),
    )
}
