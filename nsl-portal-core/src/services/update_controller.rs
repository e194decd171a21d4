//! Update center: check, download with progress, install, relaunch

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::traits::UpdaterBackend;
use crate::types::{DownloadProgress, UpdateInfo, UpdateState};

/// Folds download progress events into a displayed percentage.
///
/// The percentage never decreases and only reaches 100 on `Finished`.
/// An unknown content length (0) keeps it at 0 until then.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProgressTracker {
    content_length: u64,
    downloaded: u64,
    percent: u8,
}

impl ProgressTracker {
    pub fn apply(&mut self, event: DownloadProgress) -> u8 {
        match event {
            DownloadProgress::Started { content_length } => {
                self.content_length = content_length;
                self.downloaded = 0;
            }
            DownloadProgress::Progress { chunk_length } => {
                self.downloaded = self.downloaded.saturating_add(chunk_length);
                if self.content_length > 0 {
                    let pct = (u128::from(self.downloaded) * 100 / u128::from(self.content_length))
                        .min(99);
                    // pct <= 99
                    #[allow(clippy::cast_possible_truncation)]
                    let pct = pct as u8;
                    self.percent = self.percent.max(pct);
                }
            }
            DownloadProgress::Finished => self.percent = 100,
        }
        self.percent
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }
}

/// Resets the single-flight flag when a run ends, including on panic
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct UpdateController {
    ctx: Arc<ServiceContext>,
    backend: Arc<dyn UpdaterBackend>,
    state: Mutex<UpdateState>,
    running: AtomicBool,
}

impl UpdateController {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, backend: Arc<dyn UpdaterBackend>) -> Self {
        Self {
            ctx,
            backend,
            state: Mutex::new(UpdateState::Idle),
            running: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn state(&self) -> UpdateState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: UpdateState) {
        self.ctx.shell().render_update_state(&state);
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Run the update sequence in the background
    pub fn trigger(self: &Arc<Self>) -> JoinHandle<Option<UpdateState>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.run().await })
    }

    /// Run the whole sequence once.
    ///
    /// Returns `None` without doing anything if a run is already in progress,
    /// otherwise the state the run ended in. A failed run leaves the controller
    /// in [`UpdateState::Failed`], from which the next call starts over.
    pub async fn run(&self) -> Option<UpdateState> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::debug!("Update run already in progress");
            return None;
        }
        let _guard = RunGuard(&self.running);

        if let Err(e) = self.run_stages().await {
            e.log("Update failed");
            self.set_state(UpdateState::Failed {
                message: e.to_string(),
            });
        }
        Some(self.state())
    }

    async fn run_stages(&self) -> CoreResult<()> {
        self.set_state(UpdateState::Checking);
        let Some(update) = self.backend.check().await? else {
            log::info!("Application is up to date");
            self.set_state(UpdateState::UpToDate);
            return Ok(());
        };
        log::info!("Update available: {}", update.version);

        self.download(&update).await?;

        self.set_state(UpdateState::Installing {
            version: update.version.clone(),
        });
        self.backend.install(&update).await?;

        self.set_state(UpdateState::Relaunching);
        self.backend.relaunch().await
    }

    async fn download(&self, update: &UpdateInfo) -> CoreResult<()> {
        self.set_state(UpdateState::Downloading {
            version: update.version.clone(),
            percent: 0,
        });

        let tracker = Mutex::new(ProgressTracker::default());
        let on_progress = |event: DownloadProgress| {
            let mut tracker = tracker.lock().unwrap_or_else(PoisonError::into_inner);
            let before = tracker.percent();
            let percent = tracker.apply(event);
            if percent != before {
                self.set_state(UpdateState::Downloading {
                    version: update.version.clone(),
                    percent,
                });
            }
        };
        self.backend.download(update, &on_progress).await
    }
}
