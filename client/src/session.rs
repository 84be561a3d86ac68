//! File-backed session storage
//!
//! The CLI keeps the same three values a browser keeps in `localStorage`,
//! persisted as a small JSON file between runs.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use shared::{SessionError, SessionKey, SessionStore};
use tracing::debug;

/// On-disk layout of the session file
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl SessionFile {
    fn slot(&mut self, key: SessionKey) -> &mut Option<String> {
        match key {
            SessionKey::Access => &mut self.access,
            SessionKey::Refresh => &mut self.refresh,
            SessionKey::User => &mut self.user,
        }
    }

    fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none() && self.user.is_none()
    }
}

/// Session store persisted to a JSON file
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    state: Mutex<SessionFile>,
}

impl FileSessionStore {
    /// Open the store at `path`; a missing file is an empty session
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let state = if path.exists() {
            let content =
                fs::read_to_string(&path).map_err(|e| SessionError::Unavailable(e.to_string()))?;
            serde_json::from_str(&content).unwrap_or_else(|err| {
                debug!("Ignoring unreadable session file {:?}: {}", path, err);
                SessionFile::default()
            })
        } else {
            SessionFile::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, state: &SessionFile) -> Result<(), SessionError> {
        if state.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| SessionError::Persist(e.to_string()))?;
            }
            return Ok(());
        }

        let content =
            serde_json::to_string_pretty(state).map_err(|e| SessionError::Persist(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SessionError::Persist(e.to_string()))?;
        }
        fs::write(&self.path, content).map_err(|e| SessionError::Persist(e.to_string()))?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        let mut state = self.state.lock().ok()?;
        state.slot(key).clone()
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        *state.slot(key) = Some(value.to_string());
        self.save(&state)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        *state = SessionFile::default();
        self.save(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.set(SessionKey::Access, "a").unwrap();
        store.set(SessionKey::Refresh, "r").unwrap();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get(SessionKey::Access).as_deref(), Some("a"));
        assert_eq!(reopened.get(SessionKey::Refresh).as_deref(), Some("r"));
        assert_eq!(reopened.get(SessionKey::User), None);
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.set(SessionKey::User, "{}").unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.get(SessionKey::User), None);
    }

    #[test]
    fn test_corrupt_file_is_an_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::open(&path).unwrap();
        assert_eq!(store.get(SessionKey::Access), None);
    }
}
