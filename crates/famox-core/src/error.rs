//! Error types for `famox-core`.
//!
//! "Not found" and "wrong password" are ordinary return values (`None` and
//! `false`), not errors. What remains here are backend failures, rejected
//! input, and use of a store after it was closed.

use famox_storage::StorageError;

/// Errors from the local demo store and the data provider facade.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The underlying storage backend failed.
    #[error("provider storage error: {0}")]
    Storage(#[from] StorageError),

    /// A create input or patch failed validation.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// A record could not be serialized for persistence.
    #[error("failed to serialize {what}: {reason}")]
    Serialize { what: &'static str, reason: String },

    /// The store was closed and can no longer be used.
    #[error("provider is closed")]
    Closed,

    /// The remote backend answered with a non-success status.
    #[error("remote backend returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// The remote backend could not be reached or returned an unreadable body.
    #[cfg(feature = "remote")]
    #[error("remote backend unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProviderError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
