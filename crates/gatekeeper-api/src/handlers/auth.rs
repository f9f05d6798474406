//! Auth handlers: login, logout, refresh, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use gatekeeper_auth::Principal;
use gatekeeper_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let issued = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(issued.into())))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let issued = state.session_manager.refresh_token(&auth).await?;
    Ok(Json(ApiResponse::ok(issued.into())))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.session_manager.logout(auth.user_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<Principal>> {
    Json(ApiResponse::ok(Principal::clone(&auth)))
}
