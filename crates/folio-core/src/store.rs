#![forbid(unsafe_code)]

//! Profile-scoped key/value storage.
//!
//! All persisted state (the visit flag, the cached catalog, the cached
//! location string) lives in a single string-keyed, string-valued store
//! scoped to one visitor profile. The store is an explicit capability passed
//! to the code that needs it, never ambient state, so tests can substitute
//! [`MemoryStore`].
//!
//! # Design Invariants
//!
//! 1. **Graceful degradation**: storage failures never panic; operations
//!    return `Result` and callers fail open toward "no prior state".
//! 2. **Atomic writes**: the file backend uses a write-rename pattern so a
//!    crash mid-save cannot corrupt the profile.
//! 3. **Corruption tolerance**: an unreadable profile file loads as empty.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StoreError::Io` | file I/O failure | returned to caller, cache unaffected |
//! | `StoreError::Serialization` | JSON encode/decode | save fails, load treats file as empty |
//! | `StoreError::Poisoned` | lock poisoned | returned to caller |

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Fixed keys used by the application.
pub mod keys {
    /// Flag written after the first completed loading sequence.
    pub const VISITED: &str = "hasVisitedPortfolio";
    /// Serialized project catalog (JSON array).
    pub const PROJECTS: &str = "portfolio_projects";
    /// Cached location display string.
    pub const LOCATION: &str = "userLocation";
}

/// Errors that can occur during profile store operations.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    Serialization(String),
    /// An internal lock was poisoned.
    Poisoned,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StoreError::Poisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A profile-scoped string key/value store.
///
/// Implementations must be thread-safe; background tasks (the location
/// lookup) write through the same handle the UI loop reads from.
pub trait ProfileStore: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &str;

    /// Read a value. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Remove all keys.
    fn clear(&self) -> StoreResult<()>;

    /// Whether the backend can currently persist anything.
    fn is_available(&self) -> bool {
        true
    }
}

/// Fail-open read: storage errors read as "no prior state".
///
/// This is the gate behavior required everywhere the store feeds a display
/// decision; errors are logged and swallowed.
pub fn get_or_absent(store: &dyn ProfileStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "profile read failed, treating as absent");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory backend
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store for tests and ephemeral runs.
///
/// State is lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory store pre-populated with entries.
    #[must_use]
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            data: RwLock::new(entries.into_iter().collect()),
        }
    }
}

impl ProfileStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let guard = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut guard = self.data.write().map_err(|_| StoreError::Poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut guard = self.data.write().map_err(|_| StoreError::Poisoned)?;
        guard.remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut guard = self.data.write().map_err(|_| StoreError::Poisoned)?;
        guard.clear();
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryStore").field("entries", &count).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON file backend
// ─────────────────────────────────────────────────────────────────────────────

/// On-disk file format.
#[derive(Serialize, Deserialize)]
struct ProfileFile {
    /// Format version for future migrations.
    format_version: u32,
    entries: BTreeMap<String, String>,
}

impl ProfileFile {
    const FORMAT_VERSION: u32 = 1;

    fn new() -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// File-backed store using a single JSON document.
///
/// The full entry map is cached in memory; every write rewrites the file
/// through a temp-file + rename so readers never observe a partial document.
///
/// A missing file is first-run; an unparseable file is logged and treated as
/// empty rather than failing the launch.
pub struct JsonFileStore {
    path: PathBuf,
    cache: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or lazily create) a store at the given path.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let cache = RwLock::new(Self::load_entries(&path));
        Self { path, cache }
    }

    /// Open the store at the default profile location.
    ///
    /// Uses `$XDG_STATE_HOME/folio/state.json` on Linux, falling back to
    /// `~/.local/state` and finally the current directory.
    #[must_use]
    pub fn default_profile() -> Self {
        Self::open(default_profile_path())
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "profile open failed, starting empty");
                return BTreeMap::new();
            }
        };
        let parsed: Result<ProfileFile, _> = serde_json::from_reader(BufReader::new(file));
        match parsed {
            Ok(pf) if pf.format_version == ProfileFile::FORMAT_VERSION => pf.entries,
            Ok(pf) => {
                tracing::warn!(
                    stored = pf.format_version,
                    expected = ProfileFile::FORMAT_VERSION,
                    "profile format version mismatch, ignoring stored state"
                );
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "profile unparseable, starting empty");
                BTreeMap::new()
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut doc = ProfileFile::new();
        doc.entries = entries.clone();

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &doc)
                .map_err(|e| StoreError::Serialization(format!("profile encode failed: {e}")))?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "profile saved");
        Ok(())
    }
}

/// Resolve the default profile file path.
#[must_use]
pub fn default_profile_path() -> PathBuf {
    let base = if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        PathBuf::from(state_home)
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".local").join("state")
    } else {
        PathBuf::from(".")
    };
    base.join("folio").join("state.json")
}

impl ProfileStore for JsonFileStore {
    fn name(&self) -> &str {
        "JsonFileStore"
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let guard = self.cache.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut guard = self.cache.write().map_err(|_| StoreError::Poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut guard = self.cache.write().map_err(|_| StoreError::Poisoned)?;
        if guard.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&guard)
    }

    fn clear(&self) -> StoreResult<()> {
        let mut guard = self.cache.write().map_err(|_| StoreError::Poisoned)?;
        guard.clear();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        let Some(parent) = self.path.parent() else {
            return false;
        };
        if !parent.exists() && fs::create_dir_all(parent).is_err() {
            return false;
        }
        let probe = parent.join(".folio_write_probe");
        if fs::write(&probe, b"probe").is_ok() {
            let _ = fs::remove_file(&probe);
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileStore").field("path", &self.path).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn memory_store_clear() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.clear().unwrap();
        assert!(store.get("a").unwrap().is_none());
        assert!(store.get("b").unwrap().is_none());
    }

    #[test]
    fn memory_store_with_entries() {
        let store =
            MemoryStore::with_entries([("pre".to_string(), "existing".to_string())]);
        assert_eq!(store.get("pre").unwrap().as_deref(), Some("existing"));
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.remove("never-written").unwrap();
    }

    #[test]
    fn get_or_absent_swallows_errors() {
        struct FailingStore;
        impl ProfileStore for FailingStore {
            fn name(&self) -> &str {
                "FailingStore"
            }
            fn get(&self, _key: &str) -> StoreResult<Option<String>> {
                Err(StoreError::Poisoned)
            }
            fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
                Err(StoreError::Poisoned)
            }
            fn remove(&self, _key: &str) -> StoreResult<()> {
                Err(StoreError::Poisoned)
            }
            fn clear(&self) -> StoreResult<()> {
                Err(StoreError::Poisoned)
            }
        }
        assert!(get_or_absent(&FailingStore, keys::VISITED).is_none());
    }

    #[test]
    fn store_error_display() {
        let io = StoreError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.to_string().contains("I/O error"));
        let ser = StoreError::Serialization("bad".into());
        assert!(ser.to_string().contains("serialization"));
    }
}
