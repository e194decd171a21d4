//! Embedded browser bounds tracking
//!
//! Measures the mount region and pushes its rectangle to the browser host whenever
//! the window is resized, the sidebar settles or a view is (de)activated.

use std::sync::Arc;

use crate::services::ServiceContext;
use crate::types::MountRect;

pub struct BoundsTracker {
    ctx: Arc<ServiceContext>,
}

impl BoundsTracker {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Current rectangle of the mount region, `None` if it is missing or hidden
    pub fn compute_bounds(&self) -> Option<MountRect> {
        let mount_id = &self.ctx.config().mount_id;
        self.ctx
            .shell()
            .layout_of(mount_id)
            .and_then(|layout| layout.to_mount_rect())
    }

    /// Push `rect` to the browser host.
    ///
    /// Best effort: a failure only leaves the overlay out of place until the next
    /// report, so it is logged and swallowed.
    pub async fn report_bounds(&self, rect: MountRect) {
        if let Err(e) = self.ctx.browser_host().update_bounds(rect).await {
            log::warn!("Failed to update embedded browser bounds to {rect:?}: {e}");
        }
    }

    /// Recompute and report. Skipped silently when the mount is missing or hidden.
    pub async fn sync(&self) -> Option<MountRect> {
        let Some(rect) = self.compute_bounds() else {
            log::debug!("Mount region not visible, skipping bounds report");
            return None;
        };
        self.report_bounds(rect).await;
        Some(rect)
    }
}
