//! Demo-mode provider: static fixtures for content, the local store for
//! settings, enquiries, and the admin session.

use crate::error::ProviderError;
use crate::fixtures;
use crate::model::{
    CatalogueItem, Enquiry, EnquiryCreateInput, EnquiryPatch, MediaPost, Project, SiteSettings,
    SiteSettingsPatch, Solution,
};
use crate::provider::DataProvider;
use crate::store::LocalStore;

/// [`DataProvider`] backed by fixtures and a [`LocalStore`].
#[derive(Debug)]
pub struct DemoProvider {
    store: LocalStore,
}

impl DemoProvider {
    #[must_use]
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Content lookups still honour `close`, like every other call.
    fn ensure_open(&self) -> Result<(), ProviderError> {
        if self.store.is_closed() {
            return Err(ProviderError::Closed);
        }
        Ok(())
    }

    fn by_slug<T: Clone>(
        &self,
        items: &[T],
        slug: &str,
        slug_of: impl Fn(&T) -> &str,
    ) -> Result<Option<T>, ProviderError> {
        self.ensure_open()?;
        Ok(items.iter().find(|item| slug_of(item) == slug).cloned())
    }

    fn all<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, ProviderError> {
        self.ensure_open()?;
        Ok(items.to_vec())
    }
}

#[async_trait::async_trait]
impl DataProvider for DemoProvider {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn settings(&self) -> Result<SiteSettings, ProviderError> {
        self.store.settings().await
    }

    async fn update_settings(
        &self,
        patch: &SiteSettingsPatch,
    ) -> Result<SiteSettings, ProviderError> {
        self.store.save_settings(patch).await
    }

    async fn list_catalogue(&self) -> Result<Vec<CatalogueItem>, ProviderError> {
        self.all(fixtures::catalogue())
    }

    async fn catalogue_item(&self, slug: &str) -> Result<Option<CatalogueItem>, ProviderError> {
        self.by_slug(fixtures::catalogue(), slug, |i| i.slug.as_str())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ProviderError> {
        self.all(fixtures::projects())
    }

    async fn project(&self, slug: &str) -> Result<Option<Project>, ProviderError> {
        self.by_slug(fixtures::projects(), slug, |p| p.slug.as_str())
    }

    async fn list_media(&self) -> Result<Vec<MediaPost>, ProviderError> {
        self.all(fixtures::media())
    }

    async fn media_post(&self, slug: &str) -> Result<Option<MediaPost>, ProviderError> {
        self.by_slug(fixtures::media(), slug, |m| m.slug.as_str())
    }

    async fn list_solutions(&self) -> Result<Vec<Solution>, ProviderError> {
        self.all(fixtures::solutions())
    }

    async fn solution(&self, slug: &str) -> Result<Option<Solution>, ProviderError> {
        self.by_slug(fixtures::solutions(), slug, |s| s.slug.as_str())
    }

    async fn list_enquiries(&self) -> Result<Vec<Enquiry>, ProviderError> {
        self.store.enquiries().await
    }

    async fn enquiry(&self, id: &str) -> Result<Option<Enquiry>, ProviderError> {
        self.store.enquiry(id).await
    }

    async fn create_enquiry(&self, input: EnquiryCreateInput) -> Result<Enquiry, ProviderError> {
        self.store.add_enquiry(input).await
    }

    async fn update_enquiry(
        &self,
        id: &str,
        patch: &EnquiryPatch,
    ) -> Result<Option<Enquiry>, ProviderError> {
        self.store.update_enquiry(id, patch).await
    }

    async fn is_admin_authed(&self) -> Result<bool, ProviderError> {
        self.store.is_admin_authed().await
    }

    async fn admin_login(&self, password: &str) -> Result<bool, ProviderError> {
        self.store.admin_login(password).await
    }

    async fn admin_logout(&self) -> Result<(), ProviderError> {
        self.store.admin_logout().await
    }

    async fn close(&self) -> Result<(), ProviderError> {
        self.store.close().await
    }
}
