//! Credential storage abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Account, AccountKey, AccountSummary};

/// External encrypted credential store
///
/// Encryption and persistence are the implementation's concern. Keys passed
/// in are already normalized (see [`AccountKey::new`]).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// List every stored account without secrets
    async fn list(&self) -> CoreResult<Vec<AccountSummary>>;

    /// Get a single account
    ///
    /// # Returns
    /// * `Ok(Some(account))` - account exists
    /// * `Ok(None)` - no account for this key
    async fn get(&self, key: &AccountKey) -> CoreResult<Option<Account>>;

    /// Insert or replace the account keyed by (domain, username)
    async fn set(&self, account: &Account) -> CoreResult<()>;

    /// Remove an account
    ///
    /// # Returns
    /// Whether an account was actually removed
    async fn remove(&self, key: &AccountKey) -> CoreResult<bool>;
}
