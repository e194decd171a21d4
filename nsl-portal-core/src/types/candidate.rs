//! Login candidates observed by the embedded browser host

use serde::{Deserialize, Serialize};

use super::SessionContext;

/// Unconfirmed username/secret pair captured from a submitted login form
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCandidate {
    #[serde(alias = "user")]
    pub username: String,
    #[serde(alias = "pass")]
    pub secret: String,
}

impl CredentialCandidate {
    #[must_use]
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for CredentialCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCandidate")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// How the host classified the candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateKind {
    /// First-time login for this identity
    New,
    /// Secret differs from the stored one
    Changed,
}

/// Stored state of a candidate relative to the credential store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStatus {
    /// No account with this username for the domain
    New,
    /// Account exists with a different secret
    UpdateRequired,
    /// Account exists with the same secret
    NoChange,
}

/// Candidate together with the session context captured when it was dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEvent {
    pub kind: CandidateKind,
    pub candidate: CredentialCandidate,
    pub context: SessionContext,
}

/// Events emitted by the native backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum HostEvent {
    /// The store changed outside the controller; re-render the password table
    CredentialRefresh,
    /// First-time login observed
    CandidateNew(CredentialCandidate),
    /// Changed password observed
    CandidateChanged(CredentialCandidate),
}
