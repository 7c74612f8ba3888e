//! Storage error types.
//!
//! Variants carry the key or path involved, so a failure names the blob it
//! touched.

/// Errors raised by a [`StorageBackend`](crate::StorageBackend).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be created or opened.
    #[error("cannot open storage at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Reading a blob failed.
    #[error("cannot read '{key}': {reason}")]
    Read { key: String, reason: String },

    /// Writing a blob failed.
    #[error("cannot write '{key}': {reason}")]
    Write { key: String, reason: String },

    /// A transaction could not be started or committed.
    #[error("transaction failed: {reason}")]
    Transaction { reason: String },
}
