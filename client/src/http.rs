//! HTTP transport for the dashboard backend
//!
//! Every authenticated request carries the bearer token currently held in the
//! session store. A 401 triggers one refresh-token exchange and a single
//! retry; if that fails the session is cleared and the caller is told to go
//! back to the login page.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{RefreshRequest, RefreshResponse, SessionKey, SessionStore};
use tracing::{debug, info, warn};

use crate::cache::QueryCache;
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

const JSON: &str = "application/json";

/// Whether a request carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Bearer,
    Anonymous,
}

/// Shared handle to a session store
pub type SharedSession = Arc<dyn SessionStore + Send + Sync>;

/// REST client bound to one backend and one session
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SharedSession,
    cache: Arc<QueryCache>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SharedSession) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("workshop-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = config.base_url.trim().to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("api.base_url is empty".into()));
        }
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            session,
            cache: Arc::new(QueryCache::new()),
        })
    }

    pub fn session(&self) -> &(dyn SessionStore + Send + Sync) {
        self.session.as_ref()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let body = self.execute(Method::GET, path, query, None, Auth::Bearer).await?;
        decode(body)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
        auth: Auth,
    ) -> ClientResult<T> {
        let payload = serde_json::to_value(payload)?;
        let body = self
            .execute(Method::POST, path, &[], Some(payload), auth)
            .await?;
        decode(body)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> ClientResult<T> {
        let payload = serde_json::to_value(payload)?;
        let body = self
            .execute(Method::PATCH, path, &[], Some(payload), Auth::Bearer)
            .await?;
        decode(body)
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute(Method::DELETE, path, &[], None, Auth::Bearer)
            .await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Option<Value>,
        auth: Auth,
    ) -> ClientResult<Option<Value>> {
        let (status, body) = self
            .dispatch(method.clone(), path, query, payload.as_ref(), auth)
            .await?;

        if status == StatusCode::UNAUTHORIZED && auth == Auth::Bearer {
            warn!("{} {} answered 401, refreshing the access token", method, path);
            if let Err(err) = self.refresh_access().await {
                debug!("Refresh failed: {}", err);
                return Err(self.expire_session());
            }

            let (status, body) = self
                .dispatch(method.clone(), path, query, payload.as_ref(), auth)
                .await?;
            if status == StatusCode::UNAUTHORIZED {
                return Err(self.expire_session());
            }
            return finish(status, body);
        }

        finish(status, body)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Option<&Value>,
        auth: Auth,
    ) -> ClientResult<(StatusCode, Option<Value>)> {
        let url = self.url(path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);

        if !query.is_empty() {
            request = request.query(query);
        }

        if auth == Auth::Bearer {
            if let Some(token) = self.session.get(SessionKey::Access) {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            }
        }

        if let Some(payload) = payload {
            request = request.json(payload);
        }

        debug!("API request: {} {} {:?}", method, url, query);
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("API response: {} {} -> {}", method, url, status);

        let body = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                // Error pages are not always JSON
                Err(_) if !status.is_success() => Some(Value::String(text)),
                Err(err) => return Err(err.into()),
            }
        };

        Ok((status, body))
    }

    /// Exchange the stored refresh token for a new access token
    pub async fn refresh_access(&self) -> ClientResult<()> {
        let refresh = self
            .session
            .get(SessionKey::Refresh)
            .ok_or(ClientError::Unauthorized)?;

        let (status, body) = self
            .dispatch(
                Method::POST,
                "auth/refresh/",
                &[],
                Some(&serde_json::to_value(RefreshRequest { refresh })?),
                Auth::Anonymous,
            )
            .await?;

        let tokens: RefreshResponse = decode(finish(status, body)?)?;
        self.session.set(SessionKey::Access, &tokens.access)?;
        if let Some(rotated) = tokens.refresh {
            self.session.set(SessionKey::Refresh, &rotated)?;
        }
        info!("Access token refreshed");
        Ok(())
    }

    /// Forget the session and everything cached under it
    pub fn expire_session(&self) -> ClientError {
        warn!("Session lost, clearing stored credentials");
        if let Err(err) = self.session.clear() {
            warn!("Failed to clear session storage: {}", err);
        }
        self.cache.clear();
        ClientError::Unauthorized
    }
}

fn finish(status: StatusCode, body: Option<Value>) -> ClientResult<Option<Value>> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(ClientError::from_response(status.as_u16(), body))
    }
}

fn decode<T: DeserializeOwned>(body: Option<Value>) -> ClientResult<T> {
    Ok(serde_json::from_value(body.unwrap_or(Value::Null))?)
}
