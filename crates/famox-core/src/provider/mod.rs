//! Data provider facade.
//!
//! [`DataProvider`] is the single boundary page-level consumers talk to: the
//! HTTP server, the CLI, and anything else rendering site data. Callers never
//! see whether records come from the local demo store or a remote backend.
//!
//! The implementation is picked once at startup by [`connect`] from a
//! [`ProviderConfig`]:
//!
//! - [`DemoProvider`]: fixtures plus the [`LocalStore`](crate::store::LocalStore)
//! - [`RemoteProvider`]: HTTP client for the `famox-server` API (feature `remote`)

mod demo;
#[cfg(feature = "remote")]
mod remote;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use famox_storage::{MemoryBackend, StorageBackend};
use tracing::{info, warn};

use crate::config::{ProviderConfig, StorageKind};
use crate::dashboard::DashboardStats;
use crate::error::ProviderError;
use crate::model::{
    CatalogueItem, Enquiry, EnquiryCreateInput, EnquiryPatch, MediaPost, Project, SiteSettings,
    SiteSettingsPatch, Solution,
};
use crate::store::LocalStore;

pub use demo::DemoProvider;
#[cfg(feature = "remote")]
pub use remote::RemoteProvider;

/// Uniform async access to every entity family of the site.
///
/// Lookups by slug or id return `Ok(None)` when nothing matches. List
/// operations return the whole collection; enquiries come newest first.
/// Enquiry and settings mutations are atomic with respect to other calls on
/// the same provider.
#[async_trait::async_trait]
pub trait DataProvider: Send + Sync {
    /// Short name for logs and health output (`demo`, `remote`).
    fn name(&self) -> &'static str;

    // Settings

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn settings(&self) -> Result<SiteSettings, ProviderError>;

    /// Merge `patch` onto the current settings and return the full record.
    ///
    /// # Errors
    ///
    /// [`ProviderError::Invalid`] for a patch that fails validation.
    async fn update_settings(&self, patch: &SiteSettingsPatch)
    -> Result<SiteSettings, ProviderError>;

    // Catalogue

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn list_catalogue(&self) -> Result<Vec<CatalogueItem>, ProviderError>;

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn catalogue_item(&self, slug: &str) -> Result<Option<CatalogueItem>, ProviderError>;

    // Projects

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn list_projects(&self) -> Result<Vec<Project>, ProviderError>;

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn project(&self, slug: &str) -> Result<Option<Project>, ProviderError>;

    // Media

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn list_media(&self) -> Result<Vec<MediaPost>, ProviderError>;

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn media_post(&self, slug: &str) -> Result<Option<MediaPost>, ProviderError>;

    // Solutions

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn list_solutions(&self) -> Result<Vec<Solution>, ProviderError>;

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn solution(&self, slug: &str) -> Result<Option<Solution>, ProviderError>;

    // Enquiries

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn list_enquiries(&self) -> Result<Vec<Enquiry>, ProviderError>;

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn enquiry(&self, id: &str) -> Result<Option<Enquiry>, ProviderError>;

    /// Submit a new enquiry. The result always has status `New`.
    ///
    /// # Errors
    ///
    /// [`ProviderError::Invalid`] for incomplete contact details.
    async fn create_enquiry(&self, input: EnquiryCreateInput) -> Result<Enquiry, ProviderError>;

    /// Change status and/or notes. `Ok(None)` when no enquiry has `id`.
    ///
    /// # Errors
    ///
    /// [`ProviderError::Invalid`] for an empty patch.
    async fn update_enquiry(
        &self,
        id: &str,
        patch: &EnquiryPatch,
    ) -> Result<Option<Enquiry>, ProviderError>;

    // Admin session

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn is_admin_authed(&self) -> Result<bool, ProviderError>;

    /// `Ok(false)` for a wrong password; nothing changes in that case.
    ///
    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn admin_login(&self, password: &str) -> Result<bool, ProviderError>;

    /// # Errors
    ///
    /// Backend failure or use after close.
    async fn admin_logout(&self) -> Result<(), ProviderError>;

    /// Release the provider's resources.
    ///
    /// # Errors
    ///
    /// Backend failure while closing.
    async fn close(&self) -> Result<(), ProviderError>;

    /// Admin dashboard counters as of `now`.
    ///
    /// # Errors
    ///
    /// Propagates any error from the list operations.
    async fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardStats, ProviderError> {
        let enquiries = self.list_enquiries().await?;
        let catalogue = self.list_catalogue().await?;
        let media = self.list_media().await?;
        let projects = self.list_projects().await?;
        Ok(DashboardStats::compute(
            &enquiries,
            &catalogue,
            &media,
            &projects,
            now,
        ))
    }
}

/// Build the provider selected by `config`.
///
/// # Errors
///
/// - [`ProviderError::Storage`] if the demo store's backend cannot be opened.
/// - [`ProviderError::Invalid`] if the configuration asks for a backend that
///   was not compiled in.
/// - [`ProviderError::Http`] if the remote client cannot be built.
pub fn connect(config: &ProviderConfig) -> Result<Arc<dyn DataProvider>, ProviderError> {
    if !config.demo_mode {
        return connect_remote(config);
    }

    if config.uses_default_password() {
        warn!("demo admin password is the built-in default, set FAMOX_ADMIN_PASSWORD");
    }

    let storage = open_storage(&config.storage)?;
    let store = LocalStore::open(storage, config.admin_password.clone());
    info!(storage = ?config.storage, "using demo data provider");
    Ok(Arc::new(DemoProvider::new(store)))
}

fn open_storage(kind: &StorageKind) -> Result<Arc<dyn StorageBackend>, ProviderError> {
    match kind {
        StorageKind::Memory => Ok(Arc::new(MemoryBackend::new())),
        #[cfg(feature = "redb-backend")]
        StorageKind::Redb { path } => Ok(Arc::new(famox_storage::RedbBackend::open(path)?)),
        #[cfg(not(feature = "redb-backend"))]
        StorageKind::Redb { .. } => Err(ProviderError::invalid(
            "FAMOX_STORAGE",
            "redb requested but feature 'redb-backend' is not enabled",
        )),
    }
}

#[cfg(feature = "remote")]
fn connect_remote(config: &ProviderConfig) -> Result<Arc<dyn DataProvider>, ProviderError> {
    let provider = RemoteProvider::new(&config.api_url, config.api_timeout)?;
    info!(url = %config.api_url, "using remote data provider");
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "remote"))]
fn connect_remote(_config: &ProviderConfig) -> Result<Arc<dyn DataProvider>, ProviderError> {
    Err(ProviderError::invalid(
        "FAMOX_DEMO_MODE",
        "demo mode is off but feature 'remote' is not enabled",
    ))
}
