//! Authentication gate middleware.
//!
//! Runs [`AuthGate`](gatekeeper_auth::AuthGate) for every request, using the
//! request path as the operation name. Authenticated requests carry an
//! [`AuthContext`] extension for handlers to read.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use gatekeeper_auth::{GateOutcome, Principal};

use crate::error::ApiError;
use crate::state::AppState;

/// Principal attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthContext(pub Arc<Principal>);

/// Rejects requests that are neither bypassed nor carry a valid bearer token.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let outcome = {
        let authorization = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        state.gate.authenticate(request.uri().path(), authorization)?
    };

    if let GateOutcome::Authenticated(principal) = outcome {
        request
            .extensions_mut()
            .insert(AuthContext(Arc::new(principal)));
    }

    Ok(next.run(request).await)
}
