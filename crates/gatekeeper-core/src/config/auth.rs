//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Placeholder secret shipped in the default configuration.
pub const DEFAULT_SECRET_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Token signing and credential configuration.
///
/// Loaded once at startup and shared read-only (behind an `Arc`) by every
/// component that signs or verifies tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret key used to sign and verify tokens.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Signing algorithm identifier (`HS256`, `HS384` or `HS512`).
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Issuer written into every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Token lifetime in seconds. Also the TTL of the cached session record.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Minimum length for newly chosen passwords.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Operation names that pass the auth gate without a token.
    #[serde(default = "default_bypass_operations")]
    pub bypass_operations: Vec<String>,
}

impl AuthConfig {
    /// Rejects settings that would make every token unverifiable or
    /// instantly expired.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.secret_key.trim().is_empty() {
            return Err(AppError::configuration("auth.secret_key must not be empty"));
        }
        if self.token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_seconds must be greater than zero",
            ));
        }
        if self.issuer.trim().is_empty() {
            return Err(AppError::configuration("auth.issuer must not be empty"));
        }
        Ok(())
    }

    /// Whether the shipped placeholder secret is still configured.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            algorithm: default_algorithm(),
            issuer: default_issuer(),
            token_ttl_seconds: default_token_ttl(),
            password_min_length: default_password_min(),
            bypass_operations: default_bypass_operations(),
        }
    }
}

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_issuer() -> String {
    "gatekeeper".to_string()
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_password_min() -> usize {
    8
}

fn default_bypass_operations() -> Vec<String> {
    vec![
        "/api/users/register".to_string(),
        "/api/auth/login".to_string(),
        "/api/ping".to_string(),
    ]
}
