//! The authenticated identity carried inside tokens.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use gatekeeper_core::types::UserId;
use gatekeeper_entity::account::Account;

/// Snapshot of an account taken when a token is issued.
///
/// Permission changes made after issuance are only picked up by a new
/// login or a token refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account identifier.
    pub user_id: UserId,
    /// Login name at issuance time.
    pub username: String,
    /// Granted capabilities, kept ordered.
    pub permissions: BTreeSet<String>,
}

impl Principal {
    /// Builds a principal from the current state of an account.
    pub fn from_account(account: &Account) -> Self {
        Self {
            user_id: account.id,
            username: account.username.clone(),
            permissions: account.permissions.clone(),
        }
    }

    /// Returns whether the principal holds the given capability.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
