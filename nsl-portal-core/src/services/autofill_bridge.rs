//! Autofill sync bridge
//!
//! Turns login candidates reported by the embedded browser host into confirmed
//! credential writes:
//!
//! 1. classify the canonical domain from the destination captured with the event
//! 2. skip candidates identical to what is already stored
//! 3. bring the main window to the foreground
//! 4. ask the user through the confirmation dialog
//! 5. on acceptance save, refresh the password table and push autofill data back
//!
//! Candidates are queued and handled one at a time in emission order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{CoreError, CoreResult};
use crate::services::{
    ConfirmDialog, CredentialService, DomainClassifier, PasswordTableService, ServiceContext,
};
use crate::types::{CandidateEvent, CandidateKind, CandidateStatus};

/// How a candidate was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeOutcome {
    /// Stored under the canonical domain
    Saved { domain: String },
    /// User declined or dismissed the prompt
    Declined,
    /// Same secret already stored, no prompt shown
    Unchanged,
    /// Empty username or secret
    Ignored,
    /// User accepted but the store rejected the write
    SaveFailed,
}

/// Sending half of the candidate queue
#[derive(Debug, Clone)]
pub struct CandidateQueue {
    tx: mpsc::UnboundedSender<CandidateEvent>,
}

impl CandidateQueue {
    pub fn enqueue(&self, event: CandidateEvent) -> CoreResult<()> {
        self.tx
            .send(event)
            .map_err(|_| CoreError::HostCommunication("candidate queue closed".to_string()))
    }
}

pub struct AutofillBridge {
    ctx: Arc<ServiceContext>,
    classifier: DomainClassifier,
    credentials: Arc<CredentialService>,
    dialog: Arc<ConfirmDialog>,
    table: Arc<PasswordTableService>,
}

impl AutofillBridge {
    #[must_use]
    pub fn new(
        ctx: Arc<ServiceContext>,
        credentials: Arc<CredentialService>,
        dialog: Arc<ConfirmDialog>,
        table: Arc<PasswordTableService>,
    ) -> Self {
        let classifier = DomainClassifier::from_config(ctx.config());
        Self {
            ctx,
            classifier,
            credentials,
            dialog,
            table,
        }
    }

    /// Start the worker draining the candidate queue.
    ///
    /// The worker stops once every [`CandidateQueue`] clone has been dropped.
    pub fn spawn_worker(self: &Arc<Self>) -> (CandidateQueue, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<CandidateEvent>();
        let bridge = Arc::clone(self);
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let outcome = bridge.handle(event).await;
                log::debug!("Candidate resolved: {outcome:?}");
            }
            log::debug!("Candidate queue closed, bridge worker stopped");
        });
        (CandidateQueue { tx }, handle)
    }

    /// Resolve one candidate. Never re-prompts on its own.
    pub async fn handle(&self, event: CandidateEvent) -> BridgeOutcome {
        let CandidateEvent {
            kind,
            candidate,
            context,
        } = event;
        if candidate.username.trim().is_empty() || candidate.secret.trim().is_empty() {
            log::debug!("Ignoring incomplete login candidate");
            return BridgeOutcome::Ignored;
        }

        let domain = self.classifier.classify(&context.destination).to_string();
        log::info!(
            "Login candidate ({kind:?}) for {} on {domain}",
            candidate.username
        );

        let status = match self
            .credentials
            .candidate_status(&domain, &candidate.username, &candidate.secret)
            .await
        {
            Ok(status) => status,
            Err(e) => {
                e.log("Failed to look up stored account, prompting anyway");
                CandidateStatus::New
            }
        };
        if status == CandidateStatus::NoChange {
            return BridgeOutcome::Unchanged;
        }

        if let Err(e) = self.ctx.browser_host().focus_main_window().await {
            log::warn!("Failed to focus main window: {e}");
        }
        let settle = self.ctx.config().focus_settle();
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }

        let is_update = kind == CandidateKind::Changed || status == CandidateStatus::UpdateRequired;
        let message = if is_update {
            format!("Update password for {}?", candidate.username)
        } else {
            format!("New account detected: {}. Save it?", candidate.username)
        };
        let confirmed = match self.dialog.confirm(&message).await {
            Ok(confirmed) => confirmed,
            Err(e) => {
                e.log("Credential prompt failed");
                false
            }
        };
        if !confirmed {
            log::info!("User declined saving {}", candidate.username);
            return BridgeOutcome::Declined;
        }

        if let Err(e) = self
            .credentials
            .save_secret(&domain, &candidate.username, &candidate.secret)
            .await
        {
            e.log("Failed to save login candidate");
            return BridgeOutcome::SaveFailed;
        }

        // reload surfaces its own failures
        self.table.reload().await.ok();
        self.table.sync_autofill_for(&context.destination).await;
        BridgeOutcome::Saved { domain }
    }
}
