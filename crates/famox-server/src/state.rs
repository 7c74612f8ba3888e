//! Shared application state.
//!
//! One [`AppState`] is built at startup and shared across all handlers via
//! `Arc`. Handlers only ever see the provider facade, never the storage
//! behind it.

use std::sync::Arc;

use famox_core::provider::DataProvider;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The data provider selected at startup.
    pub provider: Arc<dyn DataProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn DataProvider>) -> Arc<Self> {
        Arc::new(Self { provider })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.provider.name())
            .finish()
    }
}
