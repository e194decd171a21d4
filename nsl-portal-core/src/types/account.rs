//! Account related type definitions

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reduce a domain or URL to the host part used as the storage key.
///
/// `https://Hcm.QuanLyTruongHoc.edu.vn/dashboard?x=1` → `hcm.quanlytruonghoc.edu.vn`
#[must_use]
pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);
    without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Uniqueness key of a stored account
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountKey {
    pub domain: String,
    pub username: String,
}

impl AccountKey {
    /// Build a key, normalizing the domain and trimming the username
    #[must_use]
    pub fn new(domain: &str, username: &str) -> Self {
        Self {
            domain: normalize_domain(domain),
            username: username.trim().to_string(),
        }
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.domain)
    }
}

/// Stored account, owned by the external credential store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub domain: String,
    pub username: String,
    pub secret: String,
    /// Optional labeled fields (organizational unit, institution name, ...)
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Account {
    #[must_use]
    pub fn key(&self) -> AccountKey {
        AccountKey::new(&self.domain, &self.username)
    }

    /// Summary view without the secret
    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            domain: self.domain.clone(),
            username: self.username.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Account as listed in the password table (no secret)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub domain: String,
    pub username: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Full details of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub username: String,
    pub secret: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl From<Account> for AccountDetails {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            secret: account.secret,
            metadata: account.metadata,
        }
    }
}

/// Contents of the account editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub domain: String,
    pub username: String,
    pub secret: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Editing an existing row (domain is read-only) rather than adding one
    #[serde(default)]
    pub is_edit: bool,
}
