//! View state machine
//!
//! Exactly one of the views is visible at a time, and the embedded browser is
//! attached only while [`View::EmbeddedSystem`] is active. Transitions are
//! serialized: a second `activate` waits for the first to finish.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::services::{
    BoundsTracker, PasswordTableService, ServiceContext, SidebarService, UpdateController,
};
use crate::types::{Destination, MountRect, SessionHandle, UserMessage, View, ViewRequest};

#[derive(Debug)]
struct ViewState {
    current: View,
    attached: bool,
}

pub struct ViewManager {
    ctx: Arc<ServiceContext>,
    bounds: Arc<BoundsTracker>,
    sidebar: Arc<SidebarService>,
    table: Arc<PasswordTableService>,
    updates: Arc<UpdateController>,
    session: SessionHandle,
    state: Mutex<ViewState>,
}

impl ViewManager {
    #[must_use]
    pub fn new(
        ctx: Arc<ServiceContext>,
        bounds: Arc<BoundsTracker>,
        sidebar: Arc<SidebarService>,
        table: Arc<PasswordTableService>,
        updates: Arc<UpdateController>,
        session: SessionHandle,
    ) -> Self {
        Self {
            ctx,
            bounds,
            sidebar,
            table,
            updates,
            session,
            state: Mutex::new(ViewState {
                current: View::Home,
                attached: false,
            }),
        }
    }

    pub async fn current_view(&self) -> View {
        self.state.lock().await.current
    }

    pub async fn is_browser_attached(&self) -> bool {
        self.state.lock().await.attached
    }

    #[must_use]
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Switch to the requested view.
    ///
    /// An invalid destination URL is rejected before anything changes. If the
    /// browser host fails to open, the view stays active without an attached
    /// browser and the error is shown to the user.
    pub async fn activate(&self, request: ViewRequest) -> CoreResult<()> {
        if let ViewRequest::EmbeddedSystem(destination) = &request {
            validate_destination(destination)?;
        }

        let mut state = self.state.lock().await;
        let target = request.view();
        let shell = self.ctx.shell();
        log::debug!("View transition {:?} -> {target:?}", state.current);

        for view in View::ALL {
            if view != target {
                shell.set_view_visible(view, false);
            }
        }
        if target != View::EmbeddedSystem
            && (state.attached || state.current == View::EmbeddedSystem)
        {
            if let Err(e) = self.ctx.browser_host().hide().await {
                log::warn!("Failed to hide embedded browser: {e}");
            }
            state.attached = false;
        }
        shell.set_view_visible(target, true);
        state.current = target;

        let default_title = self.ctx.config().titles.for_view(target);
        match request {
            ViewRequest::Home => {
                shell.set_title(default_title);
                Ok(())
            }
            ViewRequest::PasswordManager => {
                shell.set_title(default_title);
                self.table.reload().await.map(|_| ())
            }
            ViewRequest::UpdateCenter => {
                shell.set_title(default_title);
                // the controller reports its own progress and failures
                drop(self.updates.trigger());
                Ok(())
            }
            ViewRequest::EmbeddedSystem(destination) => {
                let title = if destination.name.is_empty() {
                    default_title
                } else {
                    destination.name.as_str()
                };
                shell.set_title(title);
                if let Some(menu_id) = &destination.menu_id {
                    self.sidebar.expand_submenu(menu_id);
                }
                self.session.set_destination(&destination.url).await;
                self.show_destination(&mut state, &destination).await
            }
        }
    }

    async fn show_destination(
        &self,
        state: &mut ViewState,
        destination: &Destination,
    ) -> CoreResult<()> {
        let host = self.ctx.browser_host();
        if state.attached {
            if let Err(e) = host.navigate(&destination.url).await {
                self.surface_error("Failed to open system", &e);
                return Err(e);
            }
            self.bounds.sync().await;
            return Ok(());
        }

        let rect = self.bounds.compute_bounds().unwrap_or_else(|| {
            log::warn!(
                "Mount region '{}' has no visible layout, opening browser with empty bounds",
                self.ctx.config().mount_id
            );
            MountRect::default()
        });
        match host.open(&destination.url, rect).await {
            Ok(()) => {
                log::info!("Embedded browser opened: {}", destination.url);
                state.attached = true;
                Ok(())
            }
            Err(e) => {
                self.surface_error("Failed to open system", &e);
                Err(e)
            }
        }
    }

    /// Re-report the mount bounds after the host window changed size
    pub async fn on_window_resized(&self) -> Option<MountRect> {
        let state = self.state.lock().await;
        if !state.attached {
            return None;
        }
        self.bounds.sync().await
    }

    fn surface_error(&self, context: &str, err: &CoreError) {
        err.log(context);
        self.ctx
            .shell()
            .show_message(&UserMessage::error(format!("{context}: {err}")));
    }
}

fn validate_destination(destination: &Destination) -> CoreResult<()> {
    let parsed = url::Url::parse(&destination.url).map_err(|e| {
        CoreError::ValidationError(format!("Invalid destination URL '{}': {e}", destination.url))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(CoreError::ValidationError(format!(
            "Unsupported destination scheme: {scheme}"
        ))),
    }
}
