//! Installer / updater transport abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{DownloadProgress, UpdateInfo};

/// Callback receiving download progress events in arrival order
pub type ProgressSink<'a> = &'a (dyn Fn(DownloadProgress) + Send + Sync);

/// Update transport (release feed, package download, installer, process restart)
#[async_trait]
pub trait UpdaterBackend: Send + Sync {
    /// Look for a newer release
    ///
    /// # Returns
    /// * `Ok(Some(update))` - a newer version is available
    /// * `Ok(None)` - already up to date
    async fn check(&self) -> CoreResult<Option<UpdateInfo>>;

    /// Download the package, reporting progress through `on_progress`
    async fn download(&self, update: &UpdateInfo, on_progress: ProgressSink<'_>) -> CoreResult<()>;

    /// Install the downloaded package
    async fn install(&self, update: &UpdateInfo) -> CoreResult<()>;

    /// Restart the application on the new version
    async fn relaunch(&self) -> CoreResult<()>;
}
