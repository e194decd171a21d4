//! Update related type definitions

use serde::{Deserialize, Serialize};

/// Available update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub version: String,
    #[serde(default)]
    pub notes: String,
}

/// Download progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum DownloadProgress {
    Started { content_length: u64 },
    Progress { chunk_length: u64 },
    Finished,
}

/// Stage of the update sequence, as displayed in the update center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "data", rename_all = "kebab-case")]
pub enum UpdateState {
    Idle,
    Checking,
    UpToDate,
    Downloading { version: String, percent: u8 },
    Installing { version: String },
    Relaunching,
    /// Terminal failure of one run; the update center offers a retry
    Failed { message: String },
}

impl UpdateState {
    /// Whether a run is in progress
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Checking | Self::Downloading { .. } | Self::Installing { .. } | Self::Relaunching
        )
    }
}
