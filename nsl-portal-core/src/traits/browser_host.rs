//! Embedded browser host abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::MountRect;

/// Native component rendering a web page overlaid on the application window
///
/// Every call is a request to the native backend; failures surface as
/// `CoreError::HostCommunication`.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// Create (or re-show) the embedded browser at `rect` and load `url`
    async fn open(&self, url: &str, rect: MountRect) -> CoreResult<()>;

    /// Load `url` in the already attached embedded browser
    async fn navigate(&self, url: &str) -> CoreResult<()>;

    /// Hide / detach the embedded browser
    async fn hide(&self) -> CoreResult<()>;

    /// Move the overlay to `rect`
    async fn update_bounds(&self, rect: MountRect) -> CoreResult<()>;

    /// Report the current sidebar width so the overlay follows the content area
    async fn update_layout(&self, sidebar_width: f64) -> CoreResult<()>;

    /// Re-inject the known credentials for `url` into the page for future auto-fill
    async fn refresh_autofill_data(&self, url: &str) -> CoreResult<()>;

    /// Bring the main window to the foreground.
    ///
    /// Resolves once focus has been acquired.
    async fn focus_main_window(&self) -> CoreResult<()>;
}
