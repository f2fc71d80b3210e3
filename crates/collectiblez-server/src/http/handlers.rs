use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) const API_NOT_FOUND_MESSAGE: &str = "API endpoint not found";

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub(crate) async fn health_handler() -> Response {
    Json(json!({
        "status": "ok",
        "timestamp": now_epoch_ms(),
    }))
    .into_response()
}

pub(crate) async fn api_not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": API_NOT_FOUND_MESSAGE })),
    )
        .into_response()
}
