//! Liveness handler.

use axum::Json;

use crate::dto::response::{ApiResponse, PingResponse};

/// GET /api/ping
pub async fn ping() -> Json<ApiResponse<PingResponse>> {
    Json(ApiResponse::ok(PingResponse {
        status: "ok".to_string(),
    }))
}
