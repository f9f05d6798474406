//! Credential store trait.

use async_trait::async_trait;

use gatekeeper_core::result::AppResult;
use gatekeeper_core::types::UserId;
use gatekeeper_entity::account::{Account, NewAccount};

/// Lookup and persistence of accounts.
///
/// Implementations own id assignment and username uniqueness.
#[async_trait]
pub trait AccountRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find an account by its exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Find an account by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<Account>>;

    /// Persist a new account with an already-hashed password.
    ///
    /// Fails with a conflict error when the username is taken.
    async fn create(&self, account: &NewAccount, password_hash: &str) -> AppResult<Account>;

    /// Overwrite an existing account.
    ///
    /// Fails with not-found for an unknown id and conflict when the new
    /// username belongs to another account.
    async fn update(&self, account: &Account) -> AppResult<()>;
}
