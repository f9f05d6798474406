//! Session lifecycle manager: login, refresh, and logout flows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use gatekeeper_core::types::UserId;
use gatekeeper_entity::account::Account;

use crate::account::AccountRepository;
use crate::credential::CredentialVerifier;
use crate::error::AuthError;
use crate::principal::Principal;
use crate::token::{IssuedToken, TokenCodec};

use super::cache::SessionCache;

/// Orchestrates credential checks, token issuance, and session records.
///
/// Every flow is all-or-nothing: a token is only returned once its session
/// record has been written, and a cache failure aborts the flow.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Credential verifier.
    verifier: Arc<CredentialVerifier>,
    /// Token signer.
    codec: Arc<TokenCodec>,
    /// Per-user session records.
    sessions: Arc<SessionCache>,
    /// Credential store, re-read on refresh.
    accounts: Arc<dyn AccountRepository>,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        verifier: Arc<CredentialVerifier>,
        codec: Arc<TokenCodec>,
        sessions: Arc<SessionCache>,
        accounts: Arc<dyn AccountRepository>,
    ) -> Self {
        Self {
            verifier,
            codec,
            sessions,
            accounts,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Verify credentials
    /// 2. Issue a token for the account's current principal
    /// 3. Record the token as the user's session
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let account = self.verifier.verify(username, password).await?;
        let issued = self.issue_and_record(&account).await?;
        info!(user_id = %account.id, username = %account.username, "Login successful");
        Ok(issued)
    }

    /// Re-issues a token for an authenticated principal.
    ///
    /// The account is re-read so permission changes since the previous
    /// token are picked up. An account that no longer exists cannot refresh.
    pub async fn refresh_token(&self, principal: &Principal) -> Result<IssuedToken, AuthError> {
        let Some(account) = self.accounts.find_by_id(principal.user_id).await? else {
            warn!(user_id = %principal.user_id, "Refresh for missing account");
            return Err(AuthError::CredentialInvalid);
        };
        let issued = self.issue_and_record(&account).await?;
        info!(user_id = %account.id, "Token refreshed");
        Ok(issued)
    }

    /// Deletes the user's session record.
    ///
    /// Tokens already issued keep verifying until their own expiry; logout
    /// only clears the session bookkeeping.
    pub async fn logout(&self, user_id: UserId) -> Result<(), AuthError> {
        self.sessions.delete(user_id).await?;
        info!(user_id = %user_id, "Logged out");
        Ok(())
    }

    /// Returns the token currently recorded for the user, if any.
    pub async fn current_token(&self, user_id: UserId) -> Result<Option<String>, AuthError> {
        self.sessions.get(user_id).await
    }

    async fn issue_and_record(&self, account: &Account) -> Result<IssuedToken, AuthError> {
        let principal = Principal::from_account(account);
        let issued = self.codec.issue(&principal, self.codec.token_ttl())?;

        let remaining = issued.remaining_ttl(Utc::now());
        self.sessions
            .put(account.id, &issued.token, remaining)
            .await?;
        Ok(issued)
    }
}
