//! Provider configuration.
//!
//! Loaded from `FAMOX_*` environment variables with defaults that give a
//! working in-memory demo out of the box.

use std::path::PathBuf;
use std::time::Duration;

/// Admin password used when `FAMOX_ADMIN_PASSWORD` is not set.
pub const DEFAULT_ADMIN_PASSWORD: &str = "famoxadmin123";

/// Default base URL of the remote backend.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8300";

/// Which storage backs the demo store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    /// In-memory; every run starts from the fixtures.
    Memory,
    /// redb database file.
    Redb { path: PathBuf },
}

/// Everything needed to pick and build a data provider at startup.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Serve data from the local demo store (`true`) or the remote backend.
    pub demo_mode: bool,
    /// Password accepted by the demo store's admin login.
    pub admin_password: String,
    /// Backend for the demo store.
    pub storage: StorageKind,
    /// Base URL of the remote backend.
    pub api_url: String,
    /// Per-request timeout for the remote backend.
    pub api_timeout: Duration,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("demo_mode", &self.demo_mode)
            .field("admin_password", &"[redacted]")
            .field("storage", &self.storage)
            .field("api_url", &self.api_url)
            .field("api_timeout", &self.api_timeout)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            demo_mode: true,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_owned(),
            storage: StorageKind::Memory,
            api_url: DEFAULT_API_URL.to_owned(),
            api_timeout: Duration::from_secs(10),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// - `FAMOX_DEMO_MODE`: `0` or `false` selects the remote provider (default: on)
    /// - `FAMOX_ADMIN_PASSWORD`: demo admin password (default: `famoxadmin123`)
    /// - `FAMOX_STORAGE`: `memory` or `redb` (default: `memory`)
    /// - `FAMOX_STORAGE_PATH`: redb file (default: `./data/famox.redb`)
    /// - `FAMOX_API_URL`: remote backend base URL (default: `http://127.0.0.1:8300`)
    /// - `FAMOX_API_TIMEOUT_SECS`: remote request timeout (default: `10`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; `from_env` uses the process
    /// environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let demo_mode = lookup("FAMOX_DEMO_MODE")
            .is_none_or(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off"));

        let admin_password = lookup("FAMOX_ADMIN_PASSWORD")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.admin_password);

        let storage = match lookup("FAMOX_STORAGE")
            .unwrap_or_else(|| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "redb" => StorageKind::Redb {
                path: lookup("FAMOX_STORAGE_PATH")
                    .map_or_else(|| PathBuf::from("./data/famox.redb"), PathBuf::from),
            },
            _ => StorageKind::Memory,
        };

        let api_url = lookup("FAMOX_API_URL")
            .filter(|v| !v.is_empty())
            .map_or(defaults.api_url, |v| v.trim_end_matches('/').to_owned());

        let api_timeout = lookup("FAMOX_API_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map_or(defaults.api_timeout, Duration::from_secs);

        Self {
            demo_mode,
            admin_password,
            storage,
            api_url,
            api_timeout,
        }
    }

    /// Whether the admin password is the built-in fallback.
    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ProviderConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ProviderConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_in_memory_demo() {
        let cfg = config(&[]);
        assert!(cfg.demo_mode);
        assert_eq!(cfg.storage, StorageKind::Memory);
        assert!(cfg.uses_default_password());
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn demo_mode_can_be_switched_off() {
        assert!(!config(&[("FAMOX_DEMO_MODE", "0")]).demo_mode);
        assert!(!config(&[("FAMOX_DEMO_MODE", "false")]).demo_mode);
        assert!(config(&[("FAMOX_DEMO_MODE", "1")]).demo_mode);
    }

    #[test]
    fn redb_storage_with_custom_path() {
        let cfg = config(&[("FAMOX_STORAGE", "redb"), ("FAMOX_STORAGE_PATH", "/tmp/x.redb")]);
        assert_eq!(
            cfg.storage,
            StorageKind::Redb {
                path: PathBuf::from("/tmp/x.redb")
            }
        );
    }

    #[test]
    fn password_and_api_overrides() {
        let cfg = config(&[
            ("FAMOX_ADMIN_PASSWORD", "hunter2"),
            ("FAMOX_API_URL", "https://api.famox.test/"),
            ("FAMOX_API_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(cfg.admin_password, "hunter2");
        assert!(!cfg.uses_default_password());
        assert_eq!(cfg.api_url, "https://api.famox.test");
        assert_eq!(cfg.api_timeout, Duration::from_secs(3));
    }

    #[test]
    fn debug_redacts_password() {
        let cfg = config(&[("FAMOX_ADMIN_PASSWORD", "hunter2")]);
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }
}
