//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A required field is missing or malformed (caught before calling the store)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// A call to the native backend failed (browser host, window, clipboard)
    #[error("Host communication error: {0}")]
    HostCommunication(String),

    /// Credential store error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Update check, download or install failed
    #[error("Update error: {0}")]
    UpdateError(String),
}

impl CoreError {
    /// Whether this is expected behavior (bad user input, missing resource), used to
    /// pick the log level.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) | Self::AccountNotFound(_) => true,
            Self::HostCommunication(_)
            | Self::StorageError(_)
            | Self::SerializationError(_)
            | Self::ConfigError(_)
            | Self::UpdateError(_) => false,
        }
    }

    /// Log this error at the level matching [`Self::is_expected`].
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_expected() {
        assert!(CoreError::ValidationError("domain".into()).is_expected());
        assert!(CoreError::AccountNotFound("gv01@example.com".into()).is_expected());
        assert!(!CoreError::HostCommunication("webview gone".into()).is_expected());
        assert!(!CoreError::StorageError("disk full".into()).is_expected());
    }

    #[test]
    fn serializes_with_code_and_details() {
        let json = serde_json::to_value(CoreError::AccountNotFound("gv01".into())).unwrap();
        assert_eq!(json["code"], "AccountNotFound");
        assert_eq!(json["details"], "gv01");
    }
}
