//! NSL Portal Core Library
//!
//! Provides the controller logic behind the portal shell, including:
//! - View switching and embedded browser placement (View Manager, Bounds Tracker)
//! - Credential store access and the password table
//! - Login candidate handling for the embedded browser (Autofill Sync Bridge)
//! - In-app updates (Update Controller)
//!
//! This library is platform-independent: the native shell, the embedded browser host
//! and the encrypted credential store are abstracted through traits.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::PortalConfig;
pub use error::{CoreError, CoreResult};
pub use traits::{
    BrowserHost, CredentialStore, NativeConfirm, PromptSurface, ShellSurface, UpdaterBackend,
};
