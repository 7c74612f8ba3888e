//! Storage backend abstraction for the Famox demo store.
//!
//! This crate defines the [`StorageBackend`] trait, a plain key-value
//! persistence area that knows nothing about enquiries, settings, or admin
//! sessions. It stands in for the browser-local storage of the demo site:
//! each persisted collection lives under one fixed key as a JSON blob, and the
//! store in `famox-core` does all (de)serialization.
//!
//! Two implementations are provided:
//!
//! - [`MemoryBackend`]: in-memory, for tests and throwaway demos
//! - [`RedbBackend`]: durable on-disk store backed by redb (feature `redb-backend`)

mod error;
mod memory;
#[cfg(feature = "redb-backend")]
mod redb_backend;

pub use error::StorageError;
pub use memory::MemoryBackend;
#[cfg(feature = "redb-backend")]
pub use redb_backend::RedbBackend;

/// A pluggable key-value storage backend.
///
/// Keys are fixed UTF-8 strings such as `famox/demo/enquiries/v1`; the demo
/// store only ever reads and overwrites whole blobs. Values are opaque bytes.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store a key-value pair, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Check whether a key exists in storage.
    ///
    /// The default implementation calls [`get`](StorageBackend::get) and checks
    /// for `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Release the backend. Writes made before `close` are durable afterwards.
    ///
    /// The default implementation does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if a final flush fails.
    async fn close(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
