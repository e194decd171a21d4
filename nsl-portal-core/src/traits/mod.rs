//! Collaborator abstraction trait definitions

mod browser_host;
mod credential_store;
mod dialog;
mod shell_surface;
mod updater;

pub use browser_host::BrowserHost;
pub use credential_store::CredentialStore;
pub use dialog::{NativeConfirm, PromptSurface};
pub use shell_surface::ShellSurface;
pub use updater::{ProgressSink, UpdaterBackend};
