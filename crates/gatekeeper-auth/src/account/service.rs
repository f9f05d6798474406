//! Account registration and self-service updates.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use gatekeeper_core::error::AppError;
use gatekeeper_core::types::UserId;
use gatekeeper_entity::account::{Account, AccountUpdate, NewAccount};

use crate::credential::{PasswordHasher, PasswordValidator};
use crate::error::AuthError;
use crate::session::SessionManager;

use super::repository::AccountRepository;

/// Handles account creation and changes to an existing account.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Credential store.
    accounts: Arc<dyn AccountRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Session flows, used to end the session after an update.
    sessions: Arc<SessionManager>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            validator,
            sessions,
        }
    }

    /// Registers a new account.
    ///
    /// The username must be non-blank and the password must satisfy the
    /// configured policy. Duplicate usernames fail with a conflict.
    pub async fn register(&self, request: NewAccount) -> Result<Account, AuthError> {
        if request.username.trim().is_empty() {
            return Err(AppError::validation("Username must not be blank").into());
        }
        self.validator.validate(&request.password)?;

        let hash = self.hasher.hash_password(&request.password)?;
        let account = self.accounts.create(&request, &hash).await?;

        info!(user_id = %account.id, username = %account.username, "Account registered");
        Ok(account)
    }

    /// Applies a partial update to the caller's account and ends their
    /// session.
    ///
    /// The session record is removed before the account is written, so a
    /// cache failure leaves the stored credentials untouched.
    ///
    /// Empty fields are ignored. The stored password hash is replaced only
    /// when the new password does not already match it.
    pub async fn update_account(
        &self,
        user_id: UserId,
        update: AccountUpdate,
    ) -> Result<Account, AuthError> {
        let mut account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {user_id} not found")))?;

        if let Some(username) = update.username() {
            if username.trim().is_empty() {
                return Err(AppError::validation("Username must not be blank").into());
            }
            account.username = username.to_string();
        }
        if let Some(email) = update.email() {
            account.email = Some(email.to_string());
        }
        if let Some(phone) = update.phone() {
            account.phone = Some(phone.to_string());
        }

        let mut password_changed = false;
        if let Some(password) = update.password() {
            if !self
                .hasher
                .verify_password(password, &account.password_hash)?
            {
                self.validator.validate(password)?;
                account.password_hash = self.hasher.hash_password(password)?;
                password_changed = true;
            }
        }

        account.updated_at = Utc::now();
        // A cache outage must abort before the new credentials are stored.
        self.sessions.logout(user_id).await?;
        self.accounts.update(&account).await?;

        info!(user_id = %user_id, password_changed, "Account updated");
        Ok(account)
    }
}
