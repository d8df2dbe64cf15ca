//! Error taxonomy for the theme subsystem.
//!
//! Storage and oracle failures are contained inside the subsystem, which
//! degrades instead of propagating them; only
//! [`ThemeError::InvalidThemeChoice`] reaches callers of the public API.

use thiserror::Error;

/// Errors raised within the theme subsystem.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The preference store is inaccessible. Reads behave as absent, writes
    /// are dropped, and the session continues in memory only.
    #[error("preference store unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),

    /// No system preference oracle could be attached. Explicit choices keep
    /// working; `system` will not follow host changes.
    #[error("system preference oracle unavailable")]
    OracleUnavailable,

    /// The caller passed a value outside `light`/`dark`/`system`. State is
    /// left unchanged.
    #[error("invalid theme choice {0:?} (expected light, dark, or system)")]
    InvalidThemeChoice(String),

    /// A persisted value was outside the enumerated set. Treated as absent.
    #[error("malformed persisted value {value:?} for key {key:?}")]
    MalformedPersistedValue {
        /// Preference key the value was stored under.
        key: &'static str,
        /// The out-of-range stored value.
        value: String,
    },
}

/// Error from a preference store adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// No writable location exists for this platform/session.
    #[error("no writable preference location")]
    Unavailable,
}
