//! Cache-resident session records, one per user.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use gatekeeper_cache::keys;
use gatekeeper_cache::provider::CacheManager;
use gatekeeper_core::traits::CacheProvider;
use gatekeeper_core::types::UserId;

use crate::error::AuthError;

/// Holds the most recently issued token of each user under
/// `login_token::<user_id>`.
///
/// Writes overwrite; there is no compare-and-swap, so concurrent writers
/// for the same user resolve as last-writer-wins.
#[derive(Debug, Clone)]
pub struct SessionCache {
    /// Timeout-bounded cache handle.
    cache: Arc<CacheManager>,
}

impl SessionCache {
    /// Creates a session cache over the shared cache manager.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Stores `token` as the user's session record for `ttl`.
    ///
    /// A zero `ttl` means the token is already expired; nothing is written.
    pub async fn put(&self, user_id: UserId, token: &str, ttl: Duration) -> Result<(), AuthError> {
        if ttl.is_zero() {
            return Err(AuthError::TokenExpired);
        }
        let key = keys::login_token(user_id);
        self.cache.set(&key, token, ttl).await.map_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to write session record");
            AuthError::SessionCacheUnavailable(e)
        })?;
        debug!(user_id = %user_id, ttl_secs = ttl.as_secs(), "Session record written");
        Ok(())
    }

    /// Returns the user's current session token, if any.
    pub async fn get(&self, user_id: UserId) -> Result<Option<String>, AuthError> {
        let key = keys::login_token(user_id);
        self.cache.get(&key).await.map_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to read session record");
            AuthError::SessionCacheUnavailable(e)
        })
    }

    /// Removes the user's session record.
    pub async fn delete(&self, user_id: UserId) -> Result<(), AuthError> {
        let key = keys::login_token(user_id);
        self.cache.delete(&key).await.map_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to delete session record");
            AuthError::SessionCacheUnavailable(e)
        })
    }
}
