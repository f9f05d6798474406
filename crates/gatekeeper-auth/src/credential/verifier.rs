//! Username/password verification against the credential store.

use std::sync::Arc;

use tracing::{debug, warn};

use gatekeeper_core::error::AppError;
use gatekeeper_entity::account::Account;

use crate::account::AccountRepository;
use crate::error::AuthError;

use super::hasher::PasswordHasher;

/// Checks a supplied password against the stored hash of a named account.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    /// Credential store.
    accounts: Arc<dyn AccountRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Hash verified when the username is unknown, so both failure paths
    /// do the same amount of Argon2 work.
    decoy_hash: String,
}

impl CredentialVerifier {
    /// Creates a verifier over the given credential store.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<PasswordHasher>,
    ) -> Result<Self, AppError> {
        let decoy_hash = hasher.hash_password("gatekeeper-decoy-credential")?;
        Ok(Self {
            accounts,
            hasher,
            decoy_hash,
        })
    }

    /// Returns the account when `password` matches its stored hash.
    ///
    /// An unknown username and a wrong password both fail with
    /// [`AuthError::CredentialInvalid`].
    pub async fn verify(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let Some(account) = self.accounts.find_by_username(username).await? else {
            // Burn the same hashing cost as a real mismatch.
            let _ = self.hasher.verify_password(password, &self.decoy_hash);
            debug!(username, "Credential check failed");
            return Err(AuthError::CredentialInvalid);
        };

        if !self
            .hasher
            .verify_password(password, &account.password_hash)?
        {
            warn!(user_id = %account.id, "Credential check failed");
            return Err(AuthError::CredentialInvalid);
        }

        Ok(account)
    }
}
