//! Password manager view: table rendering, row actions and the account editor

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ConfirmDialog, CredentialService, ServiceContext};
use crate::types::{AccountDraft, PasswordTable, SessionHandle, UserMessage};

pub struct PasswordTableService {
    ctx: Arc<ServiceContext>,
    credentials: Arc<CredentialService>,
    dialog: Arc<ConfirmDialog>,
    session: SessionHandle,
}

impl PasswordTableService {
    #[must_use]
    pub fn new(
        ctx: Arc<ServiceContext>,
        credentials: Arc<CredentialService>,
        dialog: Arc<ConfirmDialog>,
        session: SessionHandle,
    ) -> Self {
        Self {
            ctx,
            credentials,
            dialog,
            session,
        }
    }

    fn surface_error(&self, context: &str, err: &CoreError) {
        err.log(context);
        self.ctx
            .shell()
            .show_message(&UserMessage::error(format!("{context}: {err}")));
    }

    /// Fetch the account list and render it. Returns the number of accounts shown.
    pub async fn reload(&self) -> CoreResult<usize> {
        let shell = self.ctx.shell();
        shell.render_password_table(&PasswordTable::placeholder(PasswordTable::LOADING));

        match self.credentials.list_accounts().await {
            Ok(accounts) => {
                shell.render_password_table(&PasswordTable::from_accounts(&accounts));
                Ok(accounts.len())
            }
            Err(e) => {
                shell.render_password_table(&PasswordTable::placeholder(
                    PasswordTable::LOAD_FAILED,
                ));
                self.surface_error("Failed to load accounts", &e);
                Err(e)
            }
        }
    }

    /// "Add account": open an empty editor
    pub fn new_account(&self) {
        self.ctx.shell().open_account_editor(&AccountDraft::default());
    }

    /// Row "edit" action: load the details into the editor
    pub async fn edit_account(&self, domain: &str, username: &str) -> CoreResult<()> {
        let details = match self.credentials.get_account_details(domain, username).await {
            Ok(details) => details,
            Err(e) => {
                self.surface_error("Failed to load account", &e);
                return Err(e);
            }
        };
        self.ctx.shell().open_account_editor(&AccountDraft {
            domain: domain.to_string(),
            username: details.username,
            secret: details.secret,
            metadata: details.metadata,
            is_edit: true,
        });
        Ok(())
    }

    /// Row "copy" action: put the secret on the clipboard
    pub async fn copy_secret(&self, domain: &str, username: &str) -> CoreResult<()> {
        let result = match self.credentials.get_account_details(domain, username).await {
            Ok(details) => self.ctx.shell().copy_to_clipboard(&details.secret),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            self.surface_error("Failed to copy password", e);
        }
        result
    }

    /// Row "delete" action. Returns whether the account was deleted.
    pub async fn delete_account(&self, domain: &str, username: &str) -> CoreResult<bool> {
        if !self.dialog.confirm(&format!("Delete {username}?")).await? {
            return Ok(false);
        }
        if let Err(e) = self.credentials.delete_account(domain, username).await {
            self.surface_error("Failed to delete account", &e);
            return Err(e);
        }
        // reload surfaces its own failures
        self.reload().await.ok();
        Ok(true)
    }

    /// Editor "save": validate and store the draft, then refresh table and autofill
    pub async fn submit_editor(&self, draft: AccountDraft) -> CoreResult<()> {
        if let Err(e) = self
            .credentials
            .save_account(&draft.domain, &draft.username, &draft.secret, draft.metadata)
            .await
        {
            self.surface_error("Failed to save account", &e);
            return Err(e);
        }
        let shell = self.ctx.shell();
        shell.close_account_editor();
        shell.show_message(&UserMessage::info(format!("Saved {}", draft.username.trim())));
        // reload surfaces its own failures
        self.reload().await.ok();
        self.sync_autofill().await;
        Ok(())
    }

    /// Push autofill data for whatever the embedded browser currently shows
    pub async fn sync_autofill(&self) {
        let session = self.session.snapshot().await;
        if session.has_destination() {
            self.sync_autofill_for(&session.destination).await;
        }
    }

    /// Push autofill data for `url`. Best effort.
    pub async fn sync_autofill_for(&self, url: &str) {
        if url.is_empty() {
            return;
        }
        if let Err(e) = self.ctx.browser_host().refresh_autofill_data(url).await {
            log::warn!("Failed to refresh autofill data: {e}");
        }
    }
}
