//! Token signing and verification.
//!
//! Tokens are compact JWS strings signed with an HMAC algorithm. The
//! principal travels JSON-encoded in the `sub` claim, so a token can be
//! checked without consulting any store.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatekeeper_core::config::AuthConfig;
use gatekeeper_core::error::AppError;

use super::claims::Claims;
use crate::error::AuthError;
use crate::principal::Principal;

/// A freshly signed token and the instant it stops verifying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Signed token string.
    pub token: String,
    /// Expiration embedded in the token.
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Remaining validity at `now`; zero once expired.
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Issues and verifies signed tokens.
#[derive(Clone)]
pub struct TokenCodec {
    /// Signing key.
    encoding_key: EncodingKey,
    /// Verification key.
    decoding_key: DecodingKey,
    /// Header with the configured algorithm.
    header: Header,
    /// Validation rules; expiry is checked separately against our own clock.
    validation: Validation,
    /// Issuer written into every token.
    issuer: String,
    /// Lifetime of tokens issued by the session flows.
    token_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .field("issuer", &self.issuer)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    ///
    /// Only the HMAC family is accepted since the key material is a shared
    /// secret.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;

        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            AppError::configuration(format!(
                "Unknown signing algorithm '{}'",
                config.algorithm
            ))
        })?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::configuration(format!(
                "Signing algorithm '{}' is not supported; use HS256, HS384 or HS512",
                config.algorithm
            )));
        }

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.set_issuer(&[config.issuer.as_str()]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            header: Header::new(algorithm),
            validation,
            issuer: config.issuer.clone(),
            token_ttl: Duration::from_secs(config.token_ttl_seconds),
        })
    }

    /// Lifetime used for login and refresh tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Signs a token for `principal` that expires `ttl` from now.
    pub fn issue(&self, principal: &Principal, ttl: Duration) -> Result<IssuedToken, AuthError> {
        self.issue_at(principal, ttl, Utc::now())
    }

    /// Signs a token for `principal` as if issued at `now`.
    ///
    /// Timestamps are whole seconds; `ttl` must be at least one second.
    pub fn issue_at(
        &self,
        principal: &Principal,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let ttl_secs = i64::try_from(ttl.as_secs())
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| AppError::validation("Token TTL must be at least one second"))?;

        let iat = now.timestamp();
        let exp = iat
            .checked_add(ttl_secs)
            .ok_or_else(|| AppError::validation("Token TTL is out of range"))?;

        let claims = Claims {
            sub: serde_json::to_string(principal).map_err(AppError::from)?,
            iss: self.issuer.clone(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Verifies a token against the current time and returns its principal.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as of `now`.
    ///
    /// The signature is checked first, then the expiry, and only then is
    /// the embedded principal decoded.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?
            .claims;

        if claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        serde_json::from_str(&claims.sub).map_err(|_| AuthError::TokenMalformed)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
            AuthError::TokenInvalidSignature
        }
        JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::TokenMalformed,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use gatekeeper_core::types::UserId;

    fn config(secret: &str, algorithm: &str) -> AuthConfig {
        AuthConfig {
            secret_key: secret.to_string(),
            algorithm: algorithm.to_string(),
            issuer: "gatekeeper-test".to_string(),
            token_ttl_seconds: 3600,
            ..AuthConfig::default()
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(&config("unit-test-secret", "HS256")).unwrap()
    }

    fn alice() -> Principal {
        Principal {
            user_id: UserId(1),
            username: "alice".to_string(),
            permissions: BTreeSet::from(["blocks:read".to_string(), "users:write".to_string()]),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let codec = codec();
        let issued = codec.issue(&alice(), Duration::from_secs(60)).unwrap();
        let principal = codec.verify(&issued.token).unwrap();
        assert_eq!(principal, alice());
    }

    #[test]
    fn test_expiry_boundaries() {
        let codec = codec();
        let t0 = 1_700_000_000;
        let issued = codec
            .issue_at(&alice(), Duration::from_secs(600), at(t0))
            .unwrap();
        assert_eq!(issued.expires_at, at(t0 + 600));

        assert!(codec.verify_at(&issued.token, at(t0 + 599)).is_ok());
        assert!(matches!(
            codec.verify_at(&issued.token, at(t0 + 601)),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_two_tokens_same_instant_differ() {
        let codec = codec();
        let a = codec
            .issue_at(&alice(), Duration::from_secs(60), at(1_700_000_000))
            .unwrap();
        let b = codec
            .issue_at(&alice(), Duration::from_secs(60), at(1_700_000_000))
            .unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let other = TokenCodec::new(&config("someone-elses-secret", "HS256")).unwrap();
        let issued = other.issue(&alice(), Duration::from_secs(60)).unwrap();
        assert!(matches!(
            codec().verify(&issued.token),
            Err(AuthError::TokenInvalidSignature)
        ));
    }

    #[test]
    fn test_foreign_issuer_is_malformed() {
        let other = TokenCodec::new(&AuthConfig {
            issuer: "some-other-service".to_string(),
            ..config("unit-test-secret", "HS256")
        })
        .unwrap();
        let issued = other.issue(&alice(), Duration::from_secs(60)).unwrap();
        assert!(matches!(
            codec().verify(&issued.token),
            Err(AuthError::TokenMalformed)
        ));
    }

    #[test]
    fn test_swapped_payload_rejected() {
        let codec = codec();
        let mallory = Principal {
            user_id: UserId(2),
            username: "mallory".to_string(),
            permissions: BTreeSet::new(),
        };
        let real = codec.issue(&alice(), Duration::from_secs(60)).unwrap();
        let other = codec.issue(&mallory, Duration::from_secs(60)).unwrap();

        let real_parts: Vec<&str> = real.token.split('.').collect();
        let other_parts: Vec<&str> = other.token.split('.').collect();
        let forged = format!("{}.{}.{}", real_parts[0], other_parts[1], real_parts[2]);

        assert!(matches!(
            codec.verify(&forged),
            Err(AuthError::TokenInvalidSignature)
        ));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let other = TokenCodec::new(&config("someone-elses-secret", "HS256")).unwrap();
        let issued = other
            .issue_at(&alice(), Duration::from_secs(60), at(1_700_000_000))
            .unwrap();
        assert!(matches!(
            codec().verify_at(&issued.token, at(1_800_000_000)),
            Err(AuthError::TokenInvalidSignature)
        ));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let hs512 = TokenCodec::new(&config("unit-test-secret", "HS512")).unwrap();
        let issued = hs512.issue(&alice(), Duration::from_secs(60)).unwrap();
        assert!(matches!(
            codec().verify(&issued.token),
            Err(AuthError::TokenInvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec();
        for token in ["", "not-a-token", "a.b.c", "....."] {
            assert!(
                matches!(codec.verify(token), Err(AuthError::TokenMalformed)),
                "expected malformed for {token:?}"
            );
        }
    }

    #[test]
    fn test_subject_that_is_not_a_principal() {
        let claims = Claims {
            sub: "just-a-username".to_string(),
            iss: "gatekeeper-test".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 60,
            jti: "x".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();
        assert!(matches!(
            codec().verify(&token),
            Err(AuthError::TokenMalformed)
        ));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        assert!(matches!(
            codec().issue(&alice(), Duration::from_millis(500)),
            Err(AuthError::App(_))
        ));
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        assert!(TokenCodec::new(&config("s", "RS256")).is_err());
        assert!(TokenCodec::new(&config("s", "HS999")).is_err());
    }

    #[test]
    fn test_remaining_ttl() {
        let issued = IssuedToken {
            token: String::new(),
            expires_at: at(1_700_000_100),
        };
        assert_eq!(
            issued.remaining_ttl(at(1_700_000_040)),
            Duration::from_secs(60)
        );
        assert_eq!(issued.remaining_ttl(at(1_700_000_200)), Duration::ZERO);
    }
}
