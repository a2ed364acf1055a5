//! # Session State
//!
//! The two values that outlive a single command: who is signed in and which
//! theme they picked. Both sit behind [`SessionStore`], a small key/value
//! seam with `load`/`save`/`clear`, so commands never touch global state.
//!
//! ## Keys
//! ```text
//! ┌──────────────┬───────────────────────────────────────────────────────┐
//! │ currentUser  │ JSON user {"id","name","email","role"}, no password   │
//! │ theme        │ "light" | "dark"                                      │
//! └──────────────┴───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Backends
//! - [`FileSessionStore`]: one JSON object in `<data_dir>/session.json`
//! - [`MemorySessionStore`]: process-local map for tests

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use stockroom_core::{Theme, User};
use thiserror::Error;
use tracing::{debug, warn};

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session store lock poisoned")]
    Poisoned,
}

pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Session Store Trait
// =============================================================================

/// String key/value storage for session values.
pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> SessionResult<Option<String>>;

    fn save(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Removes `key`. Clearing a missing key is not an error.
    fn clear(&self, key: &str) -> SessionResult<()>;
}

// =============================================================================
// File Backend
// =============================================================================

/// Keeps every key in one JSON object on disk.
///
/// The whole file is rewritten on each `save`/`clear`; a missing file reads
/// as an empty session.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> SessionResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        debug!(path = ?self.path, keys = values.len(), "Session file written");
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> SessionResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> SessionResult<()> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Poisoned)?;
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn clear(&self, key: &str) -> SessionResult<()> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Poisoned)?;
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> SessionResult<Option<String>> {
        let values = self.values.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut values = self.values.lock().map_err(|_| SessionError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> SessionResult<()> {
        let mut values = self.values.lock().map_err(|_| SessionError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

// =============================================================================
// Session State
// =============================================================================

/// Typed access to the session keys over any [`SessionStore`].
#[derive(Clone)]
pub struct SessionState {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState").finish_non_exhaustive()
    }
}

impl SessionState {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        SessionState { store }
    }

    /// Session over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// The signed-in user.
    ///
    /// A stored value that no longer parses is treated as signed out.
    pub fn current_user(&self) -> SessionResult<Option<User>> {
        let Some(raw) = self.store.load(CURRENT_USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session user");
                Ok(None)
            }
        }
    }

    pub fn set_current_user(&self, user: &User) -> SessionResult<()> {
        self.store
            .save(CURRENT_USER_KEY, &serde_json::to_string(user)?)
    }

    pub fn clear_current_user(&self) -> SessionResult<()> {
        self.store.clear(CURRENT_USER_KEY)
    }

    /// The stored theme, `light` when unset or unrecognised.
    pub fn theme(&self) -> SessionResult<Theme> {
        let theme = match self.store.load(THEME_KEY)? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
                warn!(error = %e, "Unknown stored theme, using light");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Ok(theme)
    }

    pub fn set_theme(&self, theme: Theme) -> SessionResult<()> {
        self.store.save(THEME_KEY, &theme.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::Role;

    fn user() -> User {
        User {
            id: "1".into(),
            name: "Admin User".into(),
            email: "admin@example.com".into(),
            role: Role::Admin,
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("stockroom-session-{}-{}", name, std::process::id()))
            .join("session.json")
    }

    #[test]
    fn test_memory_store_round_trip() {
        let session = SessionState::in_memory();
        assert_eq!(session.current_user().unwrap(), None);

        session.set_current_user(&user()).unwrap();
        assert_eq!(session.current_user().unwrap(), Some(user()));

        session.clear_current_user().unwrap();
        assert_eq!(session.current_user().unwrap(), None);
    }

    #[test]
    fn test_theme_defaults_to_light() {
        let store = Arc::new(MemorySessionStore::new());
        let session = SessionState::new(store.clone());
        assert_eq!(session.theme().unwrap(), Theme::Light);

        store.save(THEME_KEY, "purple").unwrap();
        assert_eq!(session.theme().unwrap(), Theme::Light);

        session.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.load(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_user_reads_as_signed_out() {
        let store = Arc::new(MemorySessionStore::new());
        store.save(CURRENT_USER_KEY, "{not json").unwrap();
        assert_eq!(SessionState::new(store).current_user().unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_keys() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);

        let store = FileSessionStore::new(&path);
        assert_eq!(store.load(THEME_KEY).unwrap(), None);
        store.save(THEME_KEY, "dark").unwrap();
        store.save(CURRENT_USER_KEY, "{}").unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.load(THEME_KEY).unwrap().as_deref(), Some("dark"));

        reopened.clear(CURRENT_USER_KEY).unwrap();
        assert_eq!(store.load(CURRENT_USER_KEY).unwrap(), None);
        assert_eq!(store.load(THEME_KEY).unwrap().as_deref(), Some("dark"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
