//! Authentication error taxonomy.

use thiserror::Error;

use gatekeeper_core::error::{AppError, ErrorKind};

/// Message returned to callers for every authentication failure.
///
/// A single fixed string keeps "unknown user", "wrong password" and the
/// token failure kinds indistinguishable from the outside.
pub const UNAUTHENTICATED: &str = "Unauthenticated";

/// Failures produced by the auth core.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    CredentialInvalid,
    /// The token could not be parsed or its claims are unusable.
    #[error("token is malformed")]
    TokenMalformed,
    /// The token signature does not match, or it was signed with another algorithm.
    #[error("token signature is invalid")]
    TokenInvalidSignature,
    /// The token is past its embedded expiry.
    #[error("token has expired")]
    TokenExpired,
    /// No usable `Bearer` credential was presented.
    #[error("missing bearer credential")]
    MissingCredential,
    /// The session cache timed out or could not be reached.
    #[error("session cache unavailable")]
    SessionCacheUnavailable(#[source] AppError),
    /// A collaborator (credential store, hasher, configuration) failed.
    #[error(transparent)]
    App(#[from] AppError),
}

impl AuthError {
    /// Returns `true` for failures that mean "the caller is not authenticated".
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::CredentialInvalid
                | Self::TokenMalformed
                | Self::TokenInvalidSignature
                | Self::TokenExpired
                | Self::MissingCredential
        )
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SessionCacheUnavailable(source) => AppError::with_source(
                ErrorKind::ServiceUnavailable,
                "Session cache unavailable",
                source,
            ),
            AuthError::App(inner) => inner,
            _ => AppError::authentication(UNAUTHENTICATED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_share_one_message() {
        let kinds = [
            AuthError::CredentialInvalid,
            AuthError::TokenMalformed,
            AuthError::TokenInvalidSignature,
            AuthError::TokenExpired,
            AuthError::MissingCredential,
        ];
        for err in kinds {
            assert!(err.is_authentication_failure());
            let app: AppError = err.into();
            assert_eq!(app.kind, ErrorKind::Authentication);
            assert_eq!(app.message, UNAUTHENTICATED);
        }
    }

    #[test]
    fn test_cache_failure_maps_to_unavailable() {
        let err = AuthError::SessionCacheUnavailable(AppError::cache("timed out"));
        assert!(!err.is_authentication_failure());
        let app: AppError = err.into();
        assert_eq!(app.kind, ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_collaborator_error_passes_through() {
        let app: AppError = AuthError::from(AppError::conflict("Username taken")).into();
        assert_eq!(app.kind, ErrorKind::Conflict);
        assert_eq!(app.message, "Username taken");
    }
}
