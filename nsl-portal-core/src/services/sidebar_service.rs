//! Sidebar collapse and submenu state

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::services::{BoundsTracker, ServiceContext};

/// Result of a collapse/expand toggle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarToggle {
    /// Identifies this toggle; only the latest generation is ever settled
    pub generation: u64,
    pub collapsed: bool,
    /// Width the sidebar is animating to
    pub width: f64,
}

#[derive(Debug, Default)]
struct SidebarState {
    collapsed: bool,
    open_submenu: Option<String>,
    generation: u64,
}

/// Sidebar service
pub struct SidebarService {
    ctx: Arc<ServiceContext>,
    bounds: Arc<BoundsTracker>,
    state: Mutex<SidebarState>,
}

impl SidebarService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, bounds: Arc<BoundsTracker>) -> Self {
        Self {
            ctx,
            bounds,
            state: Mutex::new(SidebarState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SidebarState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn width_for(&self, collapsed: bool) -> f64 {
        let sidebar = &self.ctx.config().sidebar;
        if collapsed {
            sidebar.collapsed_width
        } else {
            sidebar.open_width
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.state().collapsed
    }

    /// Id of the open submenu group, if any
    pub fn open_submenu(&self) -> Option<String> {
        self.state().open_submenu.clone()
    }

    /// Flip collapsed/expanded. Collapsing closes every submenu.
    ///
    /// The new width is not reported here: call [`Self::settle`] with the returned
    /// generation once the transition has finished.
    pub fn toggle(&self) -> SidebarToggle {
        let shell = self.ctx.shell();
        let mut state = self.state();
        state.collapsed = !state.collapsed;
        state.generation += 1;
        shell.set_sidebar_collapsed(state.collapsed);
        if state.collapsed {
            if let Some(menu_id) = state.open_submenu.take() {
                shell.set_submenu_open(&menu_id, false);
            }
        }
        SidebarToggle {
            generation: state.generation,
            collapsed: state.collapsed,
            width: self.width_for(state.collapsed),
        }
    }

    /// Report the settled width to the host and re-place the overlay.
    ///
    /// Returns `false` without reporting anything when `generation` has been
    /// superseded by a later toggle.
    pub async fn settle(&self, generation: u64) -> bool {
        let width = {
            let state = self.state();
            if state.generation != generation {
                log::debug!(
                    "Skipping stale sidebar settle (generation {generation}, latest {})",
                    state.generation
                );
                return false;
            }
            self.width_for(state.collapsed)
        };

        if let Err(e) = self.ctx.browser_host().update_layout(width).await {
            log::warn!("Failed to report sidebar width {width}: {e}");
        }
        self.bounds.sync().await;
        true
    }

    /// Toggle, wait for the configured transition duration, then settle.
    ///
    /// For shells that cannot signal the end of the CSS transition.
    pub async fn toggle_and_settle(&self) -> SidebarToggle {
        let toggle = self.toggle();
        tokio::time::sleep(self.ctx.config().sidebar.transition()).await;
        self.settle(toggle.generation).await;
        toggle
    }

    /// Open `menu_id`, closing its siblings. No-op while collapsed.
    pub fn expand_submenu(&self, menu_id: &str) {
        let mut state = self.state();
        if state.collapsed || state.open_submenu.as_deref() == Some(menu_id) {
            return;
        }
        let shell = self.ctx.shell();
        if let Some(previous) = state.open_submenu.take() {
            shell.set_submenu_open(&previous, false);
        }
        shell.set_submenu_open(menu_id, true);
        state.open_submenu = Some(menu_id.to_string());
    }

    /// Menu group click: close `menu_id` if open, otherwise open it and close siblings.
    /// No-op while collapsed.
    pub fn toggle_submenu(&self, menu_id: &str) {
        let mut state = self.state();
        if state.collapsed {
            return;
        }
        let shell = self.ctx.shell();
        if state.open_submenu.as_deref() == Some(menu_id) {
            shell.set_submenu_open(menu_id, false);
            state.open_submenu = None;
            return;
        }
        if let Some(previous) = state.open_submenu.take() {
            shell.set_submenu_open(&previous, false);
        }
        shell.set_submenu_open(menu_id, true);
        state.open_submenu = Some(menu_id.to_string());
    }
}
