//! Confirmation dialog
//!
//! A single modal yes/no prompt. Requests are queued and shown one at a time in
//! the order they were made, so concurrent callers never overwrite each other's
//! prompt.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::traits::{NativeConfirm, PromptSurface};

pub struct ConfirmDialog {
    surface: Option<Arc<dyn PromptSurface>>,
    native: Arc<dyn NativeConfirm>,
    /// The modal itself; tokio's mutex grants the lock in request order
    slot: Mutex<()>,
}

impl ConfirmDialog {
    #[must_use]
    pub fn new(surface: Option<Arc<dyn PromptSurface>>, native: Arc<dyn NativeConfirm>) -> Self {
        Self {
            surface,
            native,
            slot: Mutex::new(()),
        }
    }

    /// Ask the user to confirm `message`.
    ///
    /// Waits for any prompt already on screen to be answered first. Falls back to
    /// the native blocking prompt when the dialog markup is not mounted.
    pub async fn confirm(&self, message: &str) -> CoreResult<bool> {
        let _slot = self.slot.lock().await;

        match &self.surface {
            Some(surface) if surface.is_mounted() => surface.present(message).await,
            _ => {
                log::debug!("Prompt surface not mounted, using native confirmation");
                let native = Arc::clone(&self.native);
                let message = message.to_string();
                tokio::task::spawn_blocking(move || native.confirm(&message))
                    .await
                    .map_err(|e| CoreError::HostCommunication(format!("native confirm: {e}")))
            }
        }
    }
}
