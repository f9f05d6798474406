//! Per-request authentication decision.
//!
//! The gate is a pure function of the operation name, the `Authorization`
//! header and the token codec. It holds no mutable state and never touches
//! the session cache, so a token stays accepted until its embedded expiry
//! even after logout.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use gatekeeper_core::config::AuthConfig;

use crate::error::AuthError;
use crate::principal::Principal;
use crate::token::TokenCodec;

/// Scheme prefix required on the `Authorization` header. Case-sensitive.
const BEARER_PREFIX: &str = "Bearer ";

/// Result of a successful pass through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The operation needs no authentication.
    Bypassed,
    /// The caller presented a valid token.
    Authenticated(Principal),
}

/// Decides whether a request may proceed.
#[derive(Debug, Clone)]
pub struct AuthGate {
    /// Token verifier.
    codec: Arc<TokenCodec>,
    /// Operations that skip authentication.
    bypass: HashSet<String>,
}

impl AuthGate {
    /// Creates a gate with an explicit bypass list.
    pub fn new<I, S>(codec: Arc<TokenCodec>, bypass: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codec,
            bypass: bypass.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a gate using the configured bypass operations.
    pub fn from_config(codec: Arc<TokenCodec>, config: &AuthConfig) -> Self {
        Self::new(codec, config.bypass_operations.iter().cloned())
    }

    /// Whether `operation` skips authentication.
    pub fn is_bypassed(&self, operation: &str) -> bool {
        self.bypass.contains(operation)
    }

    /// Runs the gate for one request.
    ///
    /// Bypassed operations succeed without looking at the header. Otherwise
    /// the header must carry `Bearer <token>` and the token must verify.
    pub fn authenticate(
        &self,
        operation: &str,
        authorization: Option<&str>,
    ) -> Result<GateOutcome, AuthError> {
        if self.is_bypassed(operation) {
            return Ok(GateOutcome::Bypassed);
        }

        let token = bearer_token(authorization)?;
        match self.codec.verify(token) {
            Ok(principal) => Ok(GateOutcome::Authenticated(principal)),
            Err(e) => {
                debug!(operation, error = %e, "Token rejected");
                Err(e)
            }
        }
    }
}

/// Extracts the token from an `Authorization` header value.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    authorization
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingCredential)
}
