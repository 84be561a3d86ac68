//! `localStorage`-backed session

use shared::{has_tokens, store_login, stored_user, SessionError, SessionKey, SessionStore, TokenPair};
use wasm_bindgen::prelude::*;
use web_sys::Storage;

use crate::{js_error, parse_json};

/// Session store over the window's `localStorage`
pub struct BrowserSessionStore {
    storage: Storage,
}

impl BrowserSessionStore {
    pub fn local() -> Result<Self, SessionError> {
        let window =
            web_sys::window().ok_or_else(|| SessionError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|_| SessionError::Unavailable("localStorage is blocked".into()))?
            .ok_or_else(|| SessionError::Unavailable("localStorage is missing".into()))?;
        Ok(Self { storage })
    }
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.storage.get_item(key.as_str()).ok().flatten()
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        self.storage
            .set_item(key.as_str(), value)
            .map_err(|_| SessionError::Persist(format!("cannot write {}", key.as_str())))
    }

    fn clear(&self) -> Result<(), SessionError> {
        for key in SessionKey::ALL {
            self.storage
                .remove_item(key.as_str())
                .map_err(|_| SessionError::Persist(format!("cannot remove {}", key.as_str())))?;
        }
        Ok(())
    }
}

fn local() -> Result<BrowserSessionStore, JsValue> {
    BrowserSessionStore::local().map_err(js_error)
}

/// Persist the login response: `access`, `refresh` and `user`
#[wasm_bindgen]
pub fn save_login(response_json: &str) -> Result<(), JsValue> {
    let tokens: TokenPair = parse_json("login response", response_json).map_err(js_error)?;
    store_login(&local()?, &tokens, None).map_err(js_error)
}

/// Drop all three session keys
#[wasm_bindgen]
pub fn clear_session() -> Result<(), JsValue> {
    local()?.clear().map_err(js_error)
}

#[wasm_bindgen]
pub fn has_session() -> bool {
    local().map(|store| has_tokens(&store)).unwrap_or(false)
}

/// The user saved at login, as JSON
#[wasm_bindgen]
pub fn session_user() -> Result<Option<String>, JsValue> {
    let user = stored_user(&local()?).map_err(js_error)?;
    user.map(|user| crate::to_json(&user).map_err(js_error))
        .transpose()
}

/// `Authorization` header value for the stored access token
#[wasm_bindgen]
pub fn bearer_header() -> Option<String> {
    local()
        .ok()?
        .get(SessionKey::Access)
        .map(|token| format!("Bearer {}", token))
}
