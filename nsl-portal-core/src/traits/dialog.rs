//! Confirmation prompt surfaces

use async_trait::async_trait;

use crate::error::CoreResult;

/// Modal yes/no dialog rendered by the shell
#[async_trait]
pub trait PromptSurface: Send + Sync {
    /// Whether the dialog markup is present and can be shown
    fn is_mounted(&self) -> bool;

    /// Show `message` and resolve once the user answers.
    ///
    /// Dismissing the dialog resolves to `false`. Only one call is ever
    /// outstanding at a time.
    async fn present(&self, message: &str) -> CoreResult<bool>;
}

/// Blocking native confirmation, used when no [`PromptSurface`] is mounted
pub trait NativeConfirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}
