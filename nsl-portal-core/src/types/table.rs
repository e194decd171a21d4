//! Render model of the password table

use serde::{Deserialize, Serialize};

use super::AccountSummary;

/// Per-row action button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Edit,
    Copy,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TableRow {
    /// One stored account
    Account {
        /// 1-based position
        index: usize,
        domain: String,
        username: String,
        actions: Vec<RowAction>,
    },
    /// Full-width text row (loading, no data, load failure)
    Placeholder { text: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordTable {
    pub rows: Vec<TableRow>,
}

impl PasswordTable {
    pub const LOADING: &'static str = "Loading...";
    pub const NO_DATA: &'static str = "No data";
    pub const LOAD_FAILED: &'static str = "Could not load accounts";

    #[must_use]
    pub fn placeholder(text: &str) -> Self {
        Self {
            rows: vec![TableRow::Placeholder {
                text: text.to_string(),
            }],
        }
    }

    /// Build the table for a list of accounts; an empty list yields a single "no data" row
    #[must_use]
    pub fn from_accounts(accounts: &[AccountSummary]) -> Self {
        if accounts.is_empty() {
            return Self::placeholder(Self::NO_DATA);
        }
        let rows = accounts
            .iter()
            .enumerate()
            .map(|(i, acc)| TableRow::Account {
                index: i + 1,
                domain: acc.domain.clone(),
                username: acc.username.clone(),
                actions: vec![RowAction::Edit, RowAction::Copy, RowAction::Delete],
            })
            .collect();
        Self { rows }
    }

    /// Number of action buttons across all rows
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| match row {
                TableRow::Account { actions, .. } => actions.len(),
                TableRow::Placeholder { .. } => 0,
            })
            .sum()
    }
}
