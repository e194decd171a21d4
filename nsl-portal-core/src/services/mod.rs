//! Business logic service layer

mod autofill_bridge;
mod bounds_tracker;
mod confirm_dialog;
mod credential_service;
mod domain_classifier;
mod password_table_service;
mod sidebar_service;
mod update_controller;
mod view_manager;

pub use autofill_bridge::{AutofillBridge, BridgeOutcome, CandidateQueue};
pub use bounds_tracker::BoundsTracker;
pub use confirm_dialog::ConfirmDialog;
pub use credential_service::CredentialService;
pub use domain_classifier::DomainClassifier;
pub use password_table_service::PasswordTableService;
pub use sidebar_service::{SidebarService, SidebarToggle};
pub use update_controller::{ProgressTracker, UpdateController};
pub use view_manager::ViewManager;

use std::sync::Arc;

use crate::config::PortalConfig;
use crate::traits::{BrowserHost, CredentialStore, ShellSurface};

/// Service context - holds the collaborators shared by all services
///
/// The platform layer creates this context and injects its own implementations.
pub struct ServiceContext {
    browser_host: Arc<dyn BrowserHost>,
    credential_store: Arc<dyn CredentialStore>,
    shell: Arc<dyn ShellSurface>,
    config: Arc<PortalConfig>,
}

impl ServiceContext {
    /// Create service context
    #[must_use]
    pub fn new(
        browser_host: Arc<dyn BrowserHost>,
        credential_store: Arc<dyn CredentialStore>,
        shell: Arc<dyn ShellSurface>,
        config: Arc<PortalConfig>,
    ) -> Self {
        Self {
            browser_host,
            credential_store,
            shell,
            config,
        }
    }

    #[must_use]
    pub fn browser_host(&self) -> &Arc<dyn BrowserHost> {
        &self.browser_host
    }

    #[must_use]
    pub fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        &self.credential_store
    }

    #[must_use]
    pub fn shell(&self) -> &Arc<dyn ShellSurface> {
        &self.shell
    }

    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }
}
