//! Account handlers: registration and self-service updates.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use gatekeeper_core::error::AppError;

use crate::dto::request::{RegisterRequest, UpdateAccountRequest};
use crate::dto::response::{AccountResponse, ApiResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let account = state.account_service.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(account.into())),
    ))
}

/// PUT /api/users/me
///
/// Ends the caller's session; a new login is required afterwards.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state
        .account_service
        .update_account(auth.user_id, req.into())
        .await?;

    Ok(Json(ApiResponse::ok(account.into())))
}
