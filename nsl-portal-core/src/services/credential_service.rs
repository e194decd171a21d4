//! Credential store client
//!
//! Thin request/response facade over the external credential store. Single-shot:
//! no retries, callers surface failures to the user.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{Account, AccountDetails, AccountKey, AccountSummary, CandidateStatus};

/// Credential store client
pub struct CredentialService {
    ctx: Arc<ServiceContext>,
}

impl CredentialService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List all accounts (summary view, no secrets), ordered by domain then username
    pub async fn list_accounts(&self) -> CoreResult<Vec<AccountSummary>> {
        let mut accounts = self.ctx.credential_store().list().await?;
        accounts.sort_by(|a, b| (&a.domain, &a.username).cmp(&(&b.domain, &b.username)));
        Ok(accounts)
    }

    /// Get the secret and metadata of one account
    pub async fn get_account_details(
        &self,
        domain: &str,
        username: &str,
    ) -> CoreResult<AccountDetails> {
        let key = AccountKey::new(domain, username);
        self.ctx
            .credential_store()
            .get(&key)
            .await?
            .map(AccountDetails::from)
            .ok_or_else(|| CoreError::AccountNotFound(key.to_string()))
    }

    /// Insert or update the account keyed by (domain, username)
    pub async fn save_account(
        &self,
        domain: &str,
        username: &str,
        secret: &str,
        metadata: BTreeMap<String, String>,
    ) -> CoreResult<()> {
        let key = AccountKey::new(domain, username);
        if key.domain.is_empty() {
            return Err(CoreError::ValidationError("domain is required".to_string()));
        }
        if key.username.is_empty() {
            return Err(CoreError::ValidationError("username is required".to_string()));
        }
        if secret.trim().is_empty() {
            return Err(CoreError::ValidationError("password is required".to_string()));
        }

        let account = Account {
            domain: key.domain,
            username: key.username,
            secret: secret.to_string(),
            metadata,
        };
        self.ctx.credential_store().set(&account).await?;
        log::info!("Saved account {}", account.key());
        Ok(())
    }

    /// Store a new secret for (domain, username), keeping any metadata already stored
    pub async fn save_secret(&self, domain: &str, username: &str, secret: &str) -> CoreResult<()> {
        let key = AccountKey::new(domain, username);
        let metadata = match self.ctx.credential_store().get(&key).await? {
            Some(existing) => existing.metadata,
            None => BTreeMap::new(),
        };
        self.save_account(domain, username, secret, metadata).await
    }

    /// Delete an account. Deleting an absent account succeeds.
    pub async fn delete_account(&self, domain: &str, username: &str) -> CoreResult<()> {
        let key = AccountKey::new(domain, username);
        if self.ctx.credential_store().remove(&key).await? {
            log::info!("Deleted account {key}");
        } else {
            log::debug!("Delete of absent account {key} ignored");
        }
        Ok(())
    }

    /// Compare a login candidate with what is stored for `domain`
    pub async fn candidate_status(
        &self,
        domain: &str,
        username: &str,
        secret: &str,
    ) -> CoreResult<CandidateStatus> {
        let key = AccountKey::new(domain, username);
        let status = match self.ctx.credential_store().get(&key).await? {
            None => CandidateStatus::New,
            Some(stored) if stored.secret == secret => CandidateStatus::NoChange,
            Some(_) => CandidateStatus::UpdateRequired,
        };
        Ok(status)
    }
}
