//! Account entity model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatekeeper_core::types::UserId;

/// A registered account as held by the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Argon2id PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Capability strings granted to this account.
    pub permissions: BTreeSet<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account. The password is plaintext here and is
/// hashed before it reaches the store.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    /// Requested login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Initial capability strings.
    pub permissions: BTreeSet<String>,
}

/// Partial account update. `None` and empty strings leave a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// New login name.
    pub username: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}

impl AccountUpdate {
    /// Returns the new username if one was supplied.
    pub fn username(&self) -> Option<&str> {
        non_empty(&self.username)
    }

    /// Returns the new password if one was supplied.
    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }

    /// Returns the new email if one was supplied.
    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    /// Returns the new phone number if one was supplied.
    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.phone)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
