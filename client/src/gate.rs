//! Session gate run before any dashboard page
//!
//! Missing tokens send the user to the login page. An expired access token
//! gets one refresh exchange; the session is then re-validated with a cheap
//! authenticated call. Any failure wipes the session.

use chrono::Utc;
use shared::{has_tokens, Page, SessionKey, User};
use tracing::{debug, warn};

use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::token;

/// Outcome of the gate
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Active { user: User },
    Redirect(Page),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Active { user } => Some(user),
            SessionState::Redirect(_) => None,
        }
    }
}

pub async fn ensure_session(client: &ApiClient) -> ClientResult<SessionState> {
    if !has_tokens(client.session()) {
        debug!("No stored tokens");
        return Ok(SessionState::Redirect(Page::Login));
    }

    let expired = client
        .session()
        .get(SessionKey::Access)
        .map_or(true, |access| token::is_expired(&access, Utc::now()));

    if expired {
        debug!("Access token expired, refreshing");
        if let Err(err) = client.refresh_access().await {
            warn!("Token refresh failed: {}", err);
            client.expire_session();
            return Ok(SessionState::Redirect(Page::Login));
        }
    }

    match client.current_user().await {
        Ok(user) => Ok(SessionState::Active { user }),
        Err(err) => {
            warn!("Session validation failed: {}", err);
            client.expire_session();
            Ok(SessionState::Redirect(Page::Login))
        }
    }
}
