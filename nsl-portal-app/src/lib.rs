//! Platform-agnostic application bootstrap for the NSL portal shell.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection),
//! configuration loading and the dispatch loop for events emitted by the native host.

pub mod adapters;

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use nsl_portal_core::config::InitialView;
use nsl_portal_core::error::{CoreError, CoreResult};
use nsl_portal_core::services::{
    AutofillBridge, BoundsTracker, CandidateQueue, ConfirmDialog, CredentialService,
    PasswordTableService, ServiceContext, SidebarService, SidebarToggle, UpdateController,
    ViewManager,
};
use nsl_portal_core::traits::{
    BrowserHost, CredentialStore, NativeConfirm, PromptSurface, ShellSurface, UpdaterBackend,
};
use nsl_portal_core::types::{
    CandidateEvent, CandidateKind, HostEvent, MountRect, SessionHandle, ViewRequest,
};
use nsl_portal_core::PortalConfig;

/// Load the portal configuration.
///
/// A missing file yields the defaults; an unreadable or malformed file is a
/// `ConfigError`.
pub fn load_config(path: &Path) -> CoreResult<PortalConfig> {
    if !path.exists() {
        log::info!("No configuration at {}, using defaults", path.display());
        return Ok(PortalConfig::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CoreError::ConfigError(format!("Failed to read {}: {e}", path.display()))
    })?;
    let config = PortalConfig::from_json_str(&raw)?;
    log::info!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Parse an event payload as delivered by the native host
pub fn parse_host_event(json: &str) -> CoreResult<HostEvent> {
    Ok(serde_json::from_str(json)?)
}

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every shell constructs this once
/// at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all collaborator adapters)
    pub ctx: Arc<ServiceContext>,
    pub bounds: Arc<BoundsTracker>,
    pub sidebar: Arc<SidebarService>,
    pub credentials: Arc<CredentialService>,
    pub dialog: Arc<ConfirmDialog>,
    /// Password manager view
    pub password_table: Arc<PasswordTableService>,
    pub autofill_bridge: Arc<AutofillBridge>,
    pub updates: Arc<UpdateController>,
    pub views: Arc<ViewManager>,
}

impl AppState {
    /// Run the startup sequence: show the initial view, then load the password table.
    ///
    /// Failures are logged and surfaced by the services; startup itself always completes.
    pub async fn run_startup(&self) {
        let initial = match self.ctx.config().initial_view {
            InitialView::Home => ViewRequest::Home,
            InitialView::UpdateCenter => ViewRequest::UpdateCenter,
        };
        if let Err(e) = self.views.activate(initial).await {
            e.log("Failed to show initial view");
        }
        match self.password_table.reload().await {
            Ok(count) => log::info!("Startup complete, {count} accounts loaded"),
            Err(e) => e.log("Failed to load accounts on startup"),
        }
    }

    /// Open an embedded system from the destination catalog
    pub async fn open_system(&self, id: &str) -> CoreResult<()> {
        let destination = self
            .ctx
            .config()
            .destination(id)
            .cloned()
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown system: {id}")))?;
        self.views
            .activate(ViewRequest::EmbeddedSystem(destination))
            .await
    }

    /// Collapse or expand the sidebar and re-report layout once the transition ends
    pub async fn toggle_sidebar(&self) -> SidebarToggle {
        self.sidebar.toggle_and_settle().await
    }

    pub async fn on_window_resized(&self) -> Option<MountRect> {
        self.views.on_window_resized().await
    }

    /// Start dispatching host events.
    ///
    /// Candidate events are stamped with the current session context and queued for
    /// the autofill bridge. The loop ends when `events` is closed, after the queued
    /// candidates have been handled.
    pub fn spawn_event_loop(
        self: &Arc<Self>,
        mut events: mpsc::Receiver<HostEvent>,
    ) -> JoinHandle<()> {
        let (queue, worker) = self.autofill_bridge.spawn_worker();
        let this = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                this.dispatch(&queue, event).await;
            }
            drop(queue);
            if let Err(e) = worker.await {
                log::error!("Autofill worker stopped abnormally: {e}");
            }
            log::debug!("Host event loop finished");
        })
    }

    async fn dispatch(&self, queue: &CandidateQueue, event: HostEvent) {
        let (kind, candidate) = match event {
            HostEvent::CredentialRefresh => {
                log::debug!("Credential store changed, reloading table");
                // reload surfaces its own failures
                self.password_table.reload().await.ok();
                return;
            }
            HostEvent::CandidateNew(candidate) => (CandidateKind::New, candidate),
            HostEvent::CandidateChanged(candidate) => (CandidateKind::Changed, candidate),
        };
        let context = self.views.session().snapshot().await;
        if let Err(e) = queue.enqueue(CandidateEvent {
            kind,
            candidate,
            context,
        }) {
            e.log("Dropped login candidate");
        }
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `browser_host` — the embedded browser engine
/// - `credential_store` — encrypted account storage
/// - `shell` — the UI surface
/// - `native_confirm` — fallback yes/no dialog
/// - `updater` — update transport
///
/// # Optional
/// - `prompt_surface` — in-app prompt; without it every confirmation is native
/// - `config` — defaults to `PortalConfig::default()`
pub struct AppStateBuilder {
    browser_host: Option<Arc<dyn BrowserHost>>,
    credential_store: Option<Arc<dyn CredentialStore>>,
    shell: Option<Arc<dyn ShellSurface>>,
    prompt_surface: Option<Arc<dyn PromptSurface>>,
    native_confirm: Option<Arc<dyn NativeConfirm>>,
    updater: Option<Arc<dyn UpdaterBackend>>,
    config: Option<PortalConfig>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            browser_host: None,
            credential_store: None,
            shell: None,
            prompt_surface: None,
            native_confirm: None,
            updater: None,
            config: None,
        }
    }

    #[must_use]
    pub fn browser_host(mut self, host: Arc<dyn BrowserHost>) -> Self {
        self.browser_host = Some(host);
        self
    }

    #[must_use]
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    #[must_use]
    pub fn shell(mut self, shell: Arc<dyn ShellSurface>) -> Self {
        self.shell = Some(shell);
        self
    }

    #[must_use]
    pub fn prompt_surface(mut self, surface: Arc<dyn PromptSurface>) -> Self {
        self.prompt_surface = Some(surface);
        self
    }

    #[must_use]
    pub fn native_confirm(mut self, confirm: Arc<dyn NativeConfirm>) -> Self {
        self.native_confirm = Some(confirm);
        self
    }

    #[must_use]
    pub fn updater(mut self, updater: Arc<dyn UpdaterBackend>) -> Self {
        self.updater = Some(updater);
        self
    }

    #[must_use]
    pub fn config(mut self, config: PortalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing, or
    /// the error from `PortalConfig::validate` for an unusable configuration.
    pub fn build(self) -> CoreResult<AppState> {
        let browser_host = self
            .browser_host
            .ok_or_else(|| CoreError::ValidationError("browser_host is required".to_string()))?;
        let credential_store = self.credential_store.ok_or_else(|| {
            CoreError::ValidationError("credential_store is required".to_string())
        })?;
        let shell = self
            .shell
            .ok_or_else(|| CoreError::ValidationError("shell is required".to_string()))?;
        let native_confirm = self.native_confirm.ok_or_else(|| {
            CoreError::ValidationError("native_confirm is required".to_string())
        })?;
        let updater = self
            .updater
            .ok_or_else(|| CoreError::ValidationError("updater is required".to_string()))?;
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let ctx = Arc::new(ServiceContext::new(
            browser_host,
            credential_store,
            shell,
            Arc::new(config),
        ));

        let session = SessionHandle::new();
        let bounds = Arc::new(BoundsTracker::new(Arc::clone(&ctx)));
        let sidebar = Arc::new(SidebarService::new(Arc::clone(&ctx), Arc::clone(&bounds)));
        let credentials = Arc::new(CredentialService::new(Arc::clone(&ctx)));
        let dialog = Arc::new(ConfirmDialog::new(self.prompt_surface, native_confirm));
        let password_table = Arc::new(PasswordTableService::new(
            Arc::clone(&ctx),
            Arc::clone(&credentials),
            Arc::clone(&dialog),
            session.clone(),
        ));
        let autofill_bridge = Arc::new(AutofillBridge::new(
            Arc::clone(&ctx),
            Arc::clone(&credentials),
            Arc::clone(&dialog),
            Arc::clone(&password_table),
        ));
        let updates = Arc::new(UpdateController::new(Arc::clone(&ctx), updater));
        let views = Arc::new(ViewManager::new(
            Arc::clone(&ctx),
            Arc::clone(&bounds),
            Arc::clone(&sidebar),
            Arc::clone(&password_table),
            Arc::clone(&updates),
            session,
        ));

        Ok(AppState {
            ctx,
            bounds,
            sidebar,
            credentials,
            dialog,
            password_table,
            autofill_bridge,
            updates,
            views,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
