//! Non-API routes: service status at `/` and the JSON 404 fallback.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// GET /: liveness for load balancers and the frontend.
pub(super) async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "message": "AI Recipe Generator API is running",
    }))
}

pub(super) async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
