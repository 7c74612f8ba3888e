//! Local demo store.
//!
//! Persists the mutable records of demo mode (site settings, enquiries, and
//! the admin session flag) as JSON blobs under three fixed keys of an injected
//! [`StorageBackend`]. The backend plays the part of browser-local storage: a
//! [`MemoryBackend`](famox_storage::MemoryBackend) in tests, a redb file for a
//! demo that survives restarts.
//!
//! Stored blobs that fail to parse are treated as absent. Settings then fall
//! back to the defaults and enquiries are reseeded, so a corrupted store heals
//! itself on the next access.
//!
//! Read-modify-write sequences run under a single async mutex, so callers
//! sharing one `LocalStore` never lose each other's writes. Two processes
//! pointed at the same backend still race, last write wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use famox_storage::StorageBackend;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::ProviderError;
use crate::fixtures;
use crate::model::{
    Enquiry, EnquiryCreateInput, EnquiryPatch, EnquiryStatus, SiteSettings, SiteSettingsPatch,
};

/// Key holding the enquiry collection (JSON array, newest first).
pub const ENQUIRIES_KEY: &str = "famox/demo/enquiries/v1";
/// Key holding the saved settings (JSON object, merged onto defaults on read).
pub const SETTINGS_KEY: &str = "famox/demo/settings/v1";
/// Key holding the admin session flag (`{"authed": bool}`).
pub const ADMIN_KEY: &str = "famox/demo/admin/v1";

#[derive(Debug, Default, Serialize, Deserialize)]
struct AdminSession {
    authed: bool,
}

/// Mutable demo-mode state over a pluggable storage backend.
pub struct LocalStore {
    storage: Arc<dyn StorageBackend>,
    admin_password: String,
    write_lock: Mutex<()>,
    closed: AtomicBool,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl LocalStore {
    /// Open a store over `storage`. `admin_password` is the value
    /// [`admin_login`](Self::admin_login) compares against.
    #[must_use]
    pub fn open(storage: Arc<dyn StorageBackend>, admin_password: impl Into<String>) -> Self {
        Self {
            storage,
            admin_password: admin_password.into(),
            write_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
        }
    }

    /// Close the store and release the backend. Every later call returns
    /// [`ProviderError::Closed`]. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Storage`] if the backend fails to close.
    pub async fn close(&self) -> Result<(), ProviderError> {
        let _guard = self.write_lock.lock().await;
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.storage.close().await?;
        debug!("local store closed");
        Ok(())
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Current site settings: the saved record merged onto the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Closed`] after close, or
    /// [`ProviderError::Storage`] if the backend read fails.
    pub async fn settings(&self) -> Result<SiteSettings, ProviderError> {
        self.ensure_open()?;
        self.load_settings().await
    }

    /// Merge `patch` onto the current settings and persist the full result.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Invalid`] if the patch fails validation; the
    /// stored settings are left untouched in that case.
    pub async fn save_settings(
        &self,
        patch: &SiteSettingsPatch,
    ) -> Result<SiteSettings, ProviderError> {
        patch.validate()?;
        let _guard = self.write_lock.lock().await;
        self.ensure_open()?;

        let next = patch.apply_to(&self.load_settings().await?);
        let record = SiteSettingsPatch::from(&next);
        self.write_json(SETTINGS_KEY, "settings", &record).await?;
        info!(company = %next.company_name, "site settings saved");
        Ok(next)
    }

    async fn load_settings(&self) -> Result<SiteSettings, ProviderError> {
        let saved: Option<SiteSettingsPatch> = self.read_json(SETTINGS_KEY).await?;
        let defaults = fixtures::default_settings();
        Ok(saved.map_or(defaults.clone(), |patch| patch.apply_to(&defaults)))
    }

    // ── Enquiries ────────────────────────────────────────────────────

    /// All enquiries, newest first. The first call on an empty store writes
    /// and returns the three seed enquiries.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Closed`] after close, or
    /// [`ProviderError::Storage`] if the backend fails.
    pub async fn enquiries(&self) -> Result<Vec<Enquiry>, ProviderError> {
        let _guard = self.write_lock.lock().await;
        self.ensure_open()?;
        self.load_or_seed_enquiries().await
    }

    /// Look up one enquiry by id.
    ///
    /// # Errors
    ///
    /// Same as [`enquiries`](Self::enquiries).
    pub async fn enquiry(&self, id: &str) -> Result<Option<Enquiry>, ProviderError> {
        Ok(self.enquiries().await?.into_iter().find(|e| e.id == id))
    }

    /// Record a new enquiry with a fresh id, the current time, and status
    /// `New`, and put it at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Invalid`] if the input fails validation.
    pub async fn add_enquiry(&self, input: EnquiryCreateInput) -> Result<Enquiry, ProviderError> {
        input.validate()?;
        let _guard = self.write_lock.lock().await;
        self.ensure_open()?;

        let mut enquiries = self.load_or_seed_enquiries().await?;
        let enquiry = Enquiry {
            id: fresh_enquiry_id(&enquiries),
            created_at: Utc::now(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            company: input.company.filter(|c| !c.trim().is_empty()),
            enquiry_type: input.enquiry_type,
            message: input.message,
            item_slug: input.item_slug.filter(|s| !s.trim().is_empty()),
            status: EnquiryStatus::New,
            notes: None,
        };
        enquiries.insert(0, enquiry.clone());
        self.write_json(ENQUIRIES_KEY, "enquiries", &enquiries).await?;

        info!(
            id = %enquiry.id,
            enquiry_type = %enquiry.enquiry_type,
            item = ?enquiry.item_slug,
            "enquiry received"
        );
        Ok(enquiry)
    }

    /// Apply a status/notes patch to the enquiry with `id`.
    ///
    /// Returns `Ok(None)` and writes nothing when no enquiry has that id.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Invalid`] for an empty patch.
    pub async fn update_enquiry(
        &self,
        id: &str,
        patch: &EnquiryPatch,
    ) -> Result<Option<Enquiry>, ProviderError> {
        patch.validate()?;
        let _guard = self.write_lock.lock().await;
        self.ensure_open()?;

        let mut enquiries = self.load_or_seed_enquiries().await?;
        let Some(enquiry) = enquiries.iter_mut().find(|e| e.id == id) else {
            debug!(id, "enquiry update skipped, no such id");
            return Ok(None);
        };
        let previous = enquiry.status;
        patch.apply_to(enquiry);
        let updated = enquiry.clone();
        self.write_json(ENQUIRIES_KEY, "enquiries", &enquiries).await?;

        info!(id, from = %previous, to = %updated.status, "enquiry updated");
        Ok(Some(updated))
    }

    async fn load_or_seed_enquiries(&self) -> Result<Vec<Enquiry>, ProviderError> {
        if let Some(saved) = self.read_json::<Vec<Enquiry>>(ENQUIRIES_KEY).await? {
            return Ok(saved);
        }
        let seeded = fixtures::seed_enquiries(Utc::now());
        self.write_json(ENQUIRIES_KEY, "enquiries", &seeded).await?;
        info!(count = seeded.len(), "seeded demo enquiries");
        Ok(seeded)
    }

    // ── Admin session ────────────────────────────────────────────────

    /// Whether an admin is logged in. A missing or unreadable flag means no.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Closed`] after close, or
    /// [`ProviderError::Storage`] if the backend read fails.
    pub async fn is_admin_authed(&self) -> Result<bool, ProviderError> {
        self.ensure_open()?;
        let session: Option<AdminSession> = self.read_json(ADMIN_KEY).await?;
        Ok(session.is_some_and(|s| s.authed))
    }

    /// Compare `password` with the configured admin password. On a match the
    /// session flag is persisted and `true` returned; otherwise nothing is
    /// written and `false` returned.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Storage`] if persisting the flag fails.
    pub async fn admin_login(&self, password: &str) -> Result<bool, ProviderError> {
        let _guard = self.write_lock.lock().await;
        self.ensure_open()?;

        let matches: bool = password
            .as_bytes()
            .ct_eq(self.admin_password.as_bytes())
            .into();
        if !matches {
            warn!("admin login rejected");
            return Ok(false);
        }
        self.write_json(ADMIN_KEY, "admin session", &AdminSession { authed: true })
            .await?;
        info!("admin logged in");
        Ok(true)
    }

    /// Persist a logged-out session flag.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Storage`] if persisting the flag fails.
    pub async fn admin_logout(&self) -> Result<(), ProviderError> {
        let _guard = self.write_lock.lock().await;
        self.ensure_open()?;
        self.write_json(ADMIN_KEY, "admin session", &AdminSession { authed: false })
            .await?;
        info!("admin logged out");
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn ensure_open(&self) -> Result<(), ProviderError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ProviderError::Closed);
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ProviderError> {
        let Some(raw) = self.storage.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_slice(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable stored value");
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        what: &'static str,
        value: &T,
    ) -> Result<(), ProviderError> {
        let raw = serde_json::to_vec(value).map_err(|e| ProviderError::Serialize {
            what,
            reason: e.to_string(),
        })?;
        self.storage.put(key, &raw).await?;
        Ok(())
    }
}

/// `e_` followed by eight hex characters, distinct from every existing id.
fn fresh_enquiry_id(existing: &[Enquiry]) -> String {
    loop {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        let candidate = format!("e_{}", &uuid[..8]);
        if existing.iter().all(|e| e.id != candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use famox_storage::MemoryBackend;

    use super::*;
    use crate::model::EnquiryType;

    const PASSWORD: &str = "s3cret";

    fn store() -> (MemoryBackend, LocalStore) {
        let backend = MemoryBackend::new();
        let store = LocalStore::open(Arc::new(backend.clone()), PASSWORD);
        (backend, store)
    }

    fn input(name: &str) -> EnquiryCreateInput {
        EnquiryCreateInput {
            name: name.to_owned(),
            email: "x@x.com".to_owned(),
            phone: "+60 1".to_owned(),
            company: None,
            enquiry_type: EnquiryType::QuoteRequest,
            message: "Please quote".to_owned(),
            item_slug: Some("grain-corn-desheller".to_owned()),
        }
    }

    #[tokio::test]
    async fn settings_default_when_nothing_saved() {
        let (_, store) = store();
        assert_eq!(store.settings().await.unwrap(), fixtures::default_settings());
    }

    #[tokio::test]
    async fn save_settings_keeps_unpatched_fields() {
        let (_, store) = store();
        let first = SiteSettingsPatch {
            email: Some("sales@famox.test".to_owned()),
            ..Default::default()
        };
        store.save_settings(&first).await.unwrap();

        let second = SiteSettingsPatch {
            phone_primary: Some("04-000 0000".to_owned()),
            ..Default::default()
        };
        let saved = store.save_settings(&second).await.unwrap();

        let read = store.settings().await.unwrap();
        assert_eq!(read, saved);
        assert_eq!(read.email, "sales@famox.test");
        assert_eq!(read.phone_primary, "04-000 0000");
        assert_eq!(read.company_name, fixtures::default_settings().company_name);
    }

    #[tokio::test]
    async fn invalid_settings_patch_writes_nothing() {
        let (backend, store) = store();
        let patch = SiteSettingsPatch {
            email: Some("nope".to_owned()),
            ..Default::default()
        };
        assert!(matches!(
            store.save_settings(&patch).await,
            Err(ProviderError::Invalid { field: "email", .. })
        ));
        assert!(!backend.exists(SETTINGS_KEY).await.unwrap());
    }

    #[tokio::test]
    async fn partial_saved_settings_merge_onto_defaults() {
        let (backend, store) = store();
        backend
            .put(SETTINGS_KEY, br#"{"companyName":"Famox Agrotech"}"#)
            .await
            .unwrap();
        let settings = store.settings().await.unwrap();
        assert_eq!(settings.company_name, "Famox Agrotech");
        assert_eq!(settings.whatsapp, fixtures::default_settings().whatsapp);
    }

    #[tokio::test]
    async fn cleared_optional_settings_stay_cleared() {
        let (_, store) = store();
        let patch = SiteSettingsPatch {
            phone_secondary: Some(String::new()),
            ..Default::default()
        };
        let saved = store.save_settings(&patch).await.unwrap();
        assert_eq!(saved.phone_secondary, None);
        assert_eq!(store.settings().await.unwrap().phone_secondary, None);
        assert_eq!(
            store.settings().await.unwrap().google_review_url,
            fixtures::default_settings().google_review_url
        );
    }

    #[tokio::test]
    async fn fresh_store_seeds_three_enquiries_once() {
        let (backend, store) = store();
        let first = store.enquiries().await.unwrap();
        let ids: Vec<_> = first.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e2", "e3"]);
        assert!(backend.exists(ENQUIRIES_KEY).await.unwrap());

        let second = store.enquiries().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn add_enquiry_prepends_new_record() {
        let (_, store) = store();
        store.enquiries().await.unwrap();

        let before = Utc::now();
        let created = store.add_enquiry(input("X")).await.unwrap();
        assert_eq!(created.status, EnquiryStatus::New);
        assert!(created.created_at >= before);
        assert!(created.id.starts_with("e_"));
        assert_eq!(created.id.len(), 10);

        let all = store.enquiries().await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], created);
        assert!(all[1..].iter().all(|e| e.id != created.id));
    }

    #[tokio::test]
    async fn add_enquiry_drops_blank_optional_fields() {
        let (_, store) = store();
        let mut blank = input("Y");
        blank.company = Some("   ".to_owned());
        blank.item_slug = Some(String::new());
        let created = store.add_enquiry(blank).await.unwrap();
        assert_eq!(created.company, None);
        assert_eq!(created.item_slug, None);
    }

    #[tokio::test]
    async fn add_enquiry_rejects_invalid_input() {
        let (_, store) = store();
        let mut bad = input("Z");
        bad.message = " ".to_owned();
        assert!(store.add_enquiry(bad).await.is_err());
        assert_eq!(store.enquiries().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn ids_stay_unique_across_many_adds() {
        let (_, store) = store();
        for i in 0..50 {
            store.add_enquiry(input(&format!("n{i}"))).await.unwrap();
        }
        let all = store.enquiries().await.unwrap();
        let mut ids: Vec<_> = all.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 53);
    }

    #[tokio::test]
    async fn update_status_leaves_other_fields_alone() {
        let (_, store) = store();
        let before = store.enquiry("e2").await.unwrap().unwrap();

        let patch = EnquiryPatch {
            status: Some(EnquiryStatus::Won),
            notes: None,
        };
        let updated = store.update_enquiry("e2", &patch).await.unwrap().unwrap();

        assert_eq!(updated.status, EnquiryStatus::Won);
        assert_eq!(
            Enquiry {
                status: before.status,
                ..updated.clone()
            },
            before
        );
        assert_eq!(store.enquiry("e2").await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn lost_enquiry_can_be_reopened() {
        let (_, store) = store();
        for status in [EnquiryStatus::Lost, EnquiryStatus::Contacted] {
            let patch = EnquiryPatch {
                status: Some(status),
                notes: None,
            };
            let updated = store.update_enquiry("e3", &patch).await.unwrap().unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn update_notes_only() {
        let (_, store) = store();
        let patch = EnquiryPatch {
            status: None,
            notes: Some("Followed up by phone".to_owned()),
        };
        let updated = store.update_enquiry("e1", &patch).await.unwrap().unwrap();
        assert_eq!(updated.status, EnquiryStatus::New);
        assert_eq!(updated.notes.as_deref(), Some("Followed up by phone"));
    }

    #[tokio::test]
    async fn update_unknown_id_changes_nothing() {
        let (backend, store) = store();
        store.enquiries().await.unwrap();
        let before = backend.get(ENQUIRIES_KEY).await.unwrap();

        let patch = EnquiryPatch {
            status: Some(EnquiryStatus::Won),
            notes: None,
        };
        assert_eq!(store.update_enquiry("missing", &patch).await.unwrap(), None);
        assert_eq!(backend.get(ENQUIRIES_KEY).await.unwrap(), before);
    }

    #[tokio::test]
    async fn corrupt_enquiries_are_reseeded() {
        let (backend, store) = store();
        backend.put(ENQUIRIES_KEY, b"{not json").await.unwrap();
        let enquiries = store.enquiries().await.unwrap();
        assert_eq!(enquiries.len(), 3);

        let raw = backend.get(ENQUIRIES_KEY).await.unwrap().unwrap();
        assert!(serde_json::from_slice::<Vec<Enquiry>>(&raw).is_ok());
    }

    #[tokio::test]
    async fn corrupt_settings_fall_back_to_defaults() {
        let (backend, store) = store();
        backend.put(SETTINGS_KEY, b"[1,2,3]").await.unwrap();
        assert_eq!(store.settings().await.unwrap(), fixtures::default_settings());
    }

    #[tokio::test]
    async fn admin_login_flow() {
        let (_, store) = store();
        assert!(!store.is_admin_authed().await.unwrap());

        assert!(!store.admin_login("wrong").await.unwrap());
        assert!(!store.is_admin_authed().await.unwrap());

        assert!(store.admin_login(PASSWORD).await.unwrap());
        assert!(store.is_admin_authed().await.unwrap());

        // A bad attempt does not log an authenticated admin out.
        assert!(!store.admin_login("wrong").await.unwrap());
        assert!(store.is_admin_authed().await.unwrap());

        store.admin_logout().await.unwrap();
        assert!(!store.is_admin_authed().await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_admin_flag_means_logged_out() {
        let (backend, store) = store();
        backend.put(ADMIN_KEY, b"true").await.unwrap();
        assert!(!store.is_admin_authed().await.unwrap());
    }

    #[tokio::test]
    async fn state_survives_reopen_on_same_backend() {
        let backend = MemoryBackend::new();
        let store = LocalStore::open(Arc::new(backend.clone()), PASSWORD);
        let created = store.add_enquiry(input("Persisted")).await.unwrap();
        store.close().await.unwrap();

        let reopened = LocalStore::open(Arc::new(backend), PASSWORD);
        assert_eq!(reopened.enquiry(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn closed_store_rejects_calls() {
        let (_, store) = store();
        store.close().await.unwrap();
        store.close().await.unwrap();
        assert!(store.is_closed());
        assert!(matches!(store.enquiries().await, Err(ProviderError::Closed)));
        assert!(matches!(store.settings().await, Err(ProviderError::Closed)));
        assert!(matches!(
            store.admin_login(PASSWORD).await,
            Err(ProviderError::Closed)
        ));
    }

    #[tokio::test]
    async fn concurrent_adds_are_not_lost() {
        let (_, store) = store();
        let store = Arc::new(store);
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add_enquiry(input(&format!("c{i}"))).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.enquiries().await.unwrap().len(), 23);
    }
}
