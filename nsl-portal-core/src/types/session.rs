//! Navigation session shared between the View Manager and its readers

use std::sync::Arc;

use tokio::sync::RwLock;

/// What the embedded browser is currently displaying
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// URL of the current destination, empty before the first navigation
    pub destination: String,
}

impl SessionContext {
    #[must_use]
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    #[must_use]
    pub fn has_destination(&self) -> bool {
        !self.destination.is_empty()
    }
}

/// Shared handle to the session context.
///
/// Only the View Manager writes through it; readers take a [`SessionContext`]
/// snapshot at the moment they need it.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<SessionContext>>,
}

impl SessionHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current context
    pub async fn snapshot(&self) -> SessionContext {
        self.inner.read().await.clone()
    }

    pub(crate) async fn set_destination(&self, url: &str) {
        self.inner.write().await.destination = url.to_string();
    }
}
