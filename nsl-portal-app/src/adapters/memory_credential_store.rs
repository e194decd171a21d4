//! In-memory credential store

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use nsl_portal_core::error::CoreResult;
use nsl_portal_core::traits::CredentialStore;
use nsl_portal_core::types::{Account, AccountKey, AccountSummary};

/// Credential store kept in process memory.
///
/// Nothing is encrypted or persisted; contents are lost when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    accounts: Arc<RwLock<BTreeMap<AccountKey, Account>>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `accounts`
    #[must_use]
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let map = accounts.into_iter().map(|a| (a.key(), a)).collect();
        Self {
            accounts: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn list(&self) -> CoreResult<Vec<AccountSummary>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .map(Account::summary)
            .collect())
    }

    async fn get(&self, key: &AccountKey) -> CoreResult<Option<Account>> {
        Ok(self.accounts.read().await.get(key).cloned())
    }

    async fn set(&self, account: &Account) -> CoreResult<()> {
        self.accounts
            .write()
            .await
            .insert(account.key(), account.clone());
        Ok(())
    }

    async fn remove(&self, key: &AccountKey) -> CoreResult<bool> {
        Ok(self.accounts.write().await.remove(key).is_some())
    }
}
