//! Session persistence.
//!
//! The session is a single serialized [`UserProfile`] stored under the
//! well-known key `userData` of a string key-value [`Storage`]. The storage
//! is a capability so callers can swap the on-disk file for memory in tests.
//!
//! ## Layers
//!
//! - `Storage`: get/set/remove on string keys (`FileStorage`, `MemoryStorage`)
//! - `SessionStore`: typed save/load/clear of the profile under `userData`
//! - `SessionContext`: the object handed to screens and commands; runs the
//!   auth gate, landing redirect and logout against the store

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};

use crate::config::paths;
use crate::profile::UserProfile;
use crate::route::{self, GateDecision, Route};

/// String key-value storage, scoped to one user of one machine.
pub trait Storage: Send + Sync {
    /// Returns the value under `key`, or `None` if absent.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// MemoryStorage
// ============================================================================

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// FileStorage
// ============================================================================

/// Storage backed by a JSON object file (`{"key": "value", ...}`).
///
/// Written with restricted permissions (0600) on unix.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default location (`<home>/storage.json`).
    pub fn open_default() -> Self {
        Self::new(paths::storage_path())
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage from {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage from {}", self.path.display()))
    }

    /// Reads entries for a write, starting over if the file is unreadable.
    fn read_entries_for_write(&self) -> BTreeMap<String, String> {
        self.read_entries().unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{e:#}"), "discarding unreadable storage file");
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(entries).context("Failed to serialize storage")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries_for_write();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut entries = self.read_entries_for_write();
        entries.remove(key);
        self.write_entries(&entries)
    }
}

// ============================================================================
// SessionStore
// ============================================================================

/// Result of reading the session key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLoad {
    /// No value under the session key.
    Absent,
    /// A value exists but is not a readable profile.
    Corrupt,
    /// A stored, trusted profile.
    Present(UserProfile),
}

impl SessionLoad {
    pub fn is_present(&self) -> bool {
        matches!(self, SessionLoad::Present(_))
    }
}

/// Typed access to the profile stored under the session key.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    /// Key holding the serialized profile.
    pub const SESSION_KEY: &str = "userData";

    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Serializes `profile` under the session key, overwriting any value.
    ///
    /// # Errors
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        let value = serde_json::to_string(profile).context("Failed to serialize profile")?;
        self.storage
            .set(Self::SESSION_KEY, &value)
            .context("Failed to save session")?;
        tracing::info!("session saved");
        Ok(())
    }

    /// Reads the session key.
    ///
    /// Unparseable values and unreadable storage both come back as
    /// `SessionLoad::Corrupt`; callers clear and treat it as absent.
    pub fn load(&self) -> SessionLoad {
        let raw = match self.storage.get(Self::SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SessionLoad::Absent,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "session storage unreadable");
                return SessionLoad::Corrupt;
            }
        };

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => SessionLoad::Present(profile),
            Err(e) => {
                tracing::warn!(error = %e, "stored session is corrupt");
                SessionLoad::Corrupt
            }
        }
    }

    /// Removes the session key. Idempotent.
    ///
    /// # Errors
    /// Returns an error if the storage write fails.
    pub fn clear(&self) -> Result<()> {
        self.storage
            .remove(Self::SESSION_KEY)
            .context("Failed to clear session")?;
        tracing::info!("session cleared");
        Ok(())
    }
}

// ============================================================================
// SessionContext
// ============================================================================

/// Session state handed to screens and commands.
#[derive(Clone)]
pub struct SessionContext {
    store: SessionStore,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            store: SessionStore::new(storage),
        }
    }

    /// Context over the default storage file.
    pub fn open_default() -> Self {
        Self::new(Arc::new(FileStorage::open_default()))
    }

    /// Context over fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Where the landing route should forward to.
    ///
    /// A corrupt session is cleared on the way to the login route.
    pub fn landing_route(&self) -> Route {
        let session = self.store.load();
        if session == SessionLoad::Corrupt {
            self.clear_quietly();
        }
        let route = route::decide_route(&session);
        tracing::debug!(%route, "landing redirect");
        route
    }

    /// Runs the auth gate for a protected route.
    ///
    /// A corrupt session is cleared before the redirect is returned.
    pub fn activate_protected(&self) -> GateDecision {
        let decision = route::guard(self.store.load());
        if let GateDecision::ClearAndRedirect(_) = &decision {
            self.clear_quietly();
        }
        decision
    }

    /// Clears the session and returns the login route.
    ///
    /// # Errors
    /// Returns an error if the session could not be removed; the caller
    /// must not treat the user as logged out.
    pub fn logout(&self) -> Result<Route> {
        self.store.clear()?;
        Ok(Route::Login)
    }

    fn clear_quietly(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %format!("{e:#}"), "failed to clear session");
        }
    }
}
