//! Session storage
//!
//! The dashboard persists three values between page loads: the access token,
//! the refresh token and the last-known user. They are written at login and
//! cleared at logout or when the session is lost.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::models::{TokenPair, User};

/// Keys held in session storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Access,
    Refresh,
    User,
}

impl SessionKey {
    pub const ALL: [SessionKey; 3] = [SessionKey::Access, SessionKey::Refresh, SessionKey::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Access => "access",
            SessionKey::Refresh => "refresh",
            SessionKey::User => "user",
        }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to persist session: {0}")]
    Persist(String),

    #[error("stored user is malformed")]
    MalformedUser(#[from] serde_json::Error),
}

/// Backing store for the session values
pub trait SessionStore {
    fn get(&self, key: SessionKey) -> Option<String>;
    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError>;
    /// Remove all three keys
    fn clear(&self) -> Result<(), SessionError>;
}

/// Persist the outcome of a successful login
pub fn store_login(
    store: &dyn SessionStore,
    tokens: &TokenPair,
    user: Option<&User>,
) -> Result<(), SessionError> {
    store.set(SessionKey::Access, &tokens.access)?;
    store.set(SessionKey::Refresh, &tokens.refresh)?;
    if let Some(user) = user.or(tokens.user.as_ref()) {
        store.set(SessionKey::User, &serde_json::to_string(user)?)?;
    }
    Ok(())
}

/// The user saved at login, if any
pub fn stored_user(store: &dyn SessionStore) -> Result<Option<User>, SessionError> {
    store
        .get(SessionKey::User)
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(SessionError::from)
}

/// Both tokens are present
pub fn has_tokens(store: &dyn SessionStore) -> bool {
    store.get(SessionKey::Access).is_some() && store.get(SessionKey::Refresh).is_some()
}

/// In-memory store for tests and short-lived tools
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().map(|v| v.is_empty()).unwrap_or(true)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.values.read().ok()?.get(&key).cloned()
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        self.values
            .write()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?
            .insert(key, value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.values
            .write()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::user;

    fn tokens() -> TokenPair {
        TokenPair {
            access: "access-token".into(),
            refresh: "refresh-token".into(),
            user: None,
        }
    }

    #[test]
    fn test_store_login_writes_all_keys() {
        let store = MemorySessionStore::new();
        let me = user(1, "admin", "admin@example.com", Some("Central Bank"));
        store_login(&store, &tokens(), Some(&me)).unwrap();

        assert_eq!(store.get(SessionKey::Access).as_deref(), Some("access-token"));
        assert_eq!(store.get(SessionKey::Refresh).as_deref(), Some("refresh-token"));
        assert_eq!(stored_user(&store).unwrap(), Some(me));
        assert!(has_tokens(&store));
    }

    #[test]
    fn test_user_from_token_pair_is_used_when_none_given() {
        let store = MemorySessionStore::new();
        let mut pair = tokens();
        pair.user = Some(user(2, "keeper", "keeper@example.com", None));
        store_login(&store, &pair, None).unwrap();

        assert_eq!(stored_user(&store).unwrap().unwrap().username, "keeper");
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = MemorySessionStore::new();
        store_login(&store, &tokens(), None).unwrap();
        store.clear().unwrap();

        assert!(store.is_empty());
        assert!(!has_tokens(&store));
        assert_eq!(stored_user(&store).unwrap(), None);
    }

    #[test]
    fn test_malformed_user() {
        let store = MemorySessionStore::new();
        store.set(SessionKey::User, "{not json").unwrap();
        assert!(matches!(stored_user(&store), Err(SessionError::MalformedUser(_))));
    }
}
