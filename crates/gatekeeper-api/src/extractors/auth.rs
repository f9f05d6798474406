//! `AuthUser` extractor: reads the principal the auth gate attached.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatekeeper_auth::{AuthError, Principal};

use crate::error::ApiError;
use crate::middleware::AuthContext;

/// Authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Arc<Principal>);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent on bypassed routes.
        parts
            .extensions
            .get::<AuthContext>()
            .map(|ctx| AuthUser(Arc::clone(&ctx.0)))
            .ok_or_else(|| AuthError::MissingCredential.into())
    }
}
