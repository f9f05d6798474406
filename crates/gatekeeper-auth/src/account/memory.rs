//! In-process account store backed by `DashMap`.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use gatekeeper_core::error::AppError;
use gatekeeper_core::result::AppResult;
use gatekeeper_core::types::UserId;
use gatekeeper_entity::account::{Account, NewAccount};

use super::repository::AccountRepository;

/// Account store held entirely in memory. Ids are assigned sequentially
/// from 1.
#[derive(Debug)]
pub struct MemoryAccountRepository {
    /// Accounts keyed by id.
    accounts: DashMap<UserId, Account>,
    /// Username to id index.
    usernames: DashMap<String, UserId>,
    /// Next id to hand out.
    next_id: AtomicU64,
}

impl MemoryAccountRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            usernames: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let Some(id) = self.usernames.get(username).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn create(&self, account: &NewAccount, password_hash: &str) -> AppResult<Account> {
        let id = match self.usernames.entry(account.username.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Username '{}' is already taken",
                    account.username
                )));
            }
            Entry::Vacant(slot) => {
                let id = UserId(self.next_id.fetch_add(1, Ordering::Relaxed));
                slot.insert(id);
                id
            }
        };

        let now = Utc::now();
        let created = Account {
            id,
            username: account.username.clone(),
            password_hash: password_hash.to_string(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            permissions: account.permissions.clone(),
            created_at: now,
            updated_at: now,
        };
        self.accounts.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, account: &Account) -> AppResult<()> {
        let previous = self
            .accounts
            .get(&account.id)
            .map(|a| a.username.clone())
            .ok_or_else(|| AppError::not_found(format!("Account {} not found", account.id)))?;

        if previous != account.username {
            match self.usernames.entry(account.username.clone()) {
                Entry::Occupied(_) => {
                    return Err(AppError::conflict(format!(
                        "Username '{}' is already taken",
                        account.username
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(account.id);
                }
            }
            self.usernames.remove(&previous);
        }

        self.accounts.insert(account.id, account.clone());
        Ok(())
    }
}
