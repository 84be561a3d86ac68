//! Login, logout and the current user

use shared::{store_login, stored_user, Id, LoginRequest, SessionKey, TokenPair, User};
use tracing::{info, warn};

use super::query::ListQuery;
use super::users::Users;
use crate::error::{ClientError, ClientResult};
use crate::http::{ApiClient, Auth};
use crate::token;

const LOGIN_PATH: &str = "auth/login/";

impl ApiClient {
    /// Exchange credentials for a token pair and persist the session.
    ///
    /// Nothing is stored unless the whole login succeeds.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<User> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        let tokens: TokenPair = match self.post(LOGIN_PATH, &request, Auth::Anonymous).await {
            Ok(tokens) => tokens,
            Err(err) if matches!(err.status(), Some(400) | Some(401)) => {
                warn!("Login rejected for {}", request.username);
                return Err(ClientError::InvalidCredentials);
            }
            Err(err) => return Err(err),
        };

        store_login(self.session(), &tokens, None)?;
        let user = match tokens.user {
            Some(user) => user,
            None => match self.lookup_user(Some(&request.username)).await {
                Ok(user) => {
                    store_login(self.session(), &tokens, Some(&user))?;
                    user
                }
                Err(err) => {
                    self.session().clear()?;
                    return Err(err);
                }
            },
        };

        self.cache().clear();
        info!("Logged in as {}", user.username);
        Ok(user)
    }

    /// Forget tokens, the stored user and all cached queries
    pub fn logout(&self) -> ClientResult<()> {
        self.session().clear()?;
        self.cache().clear();
        info!("Logged out");
        Ok(())
    }

    /// Validate the session with a cheap authenticated call and return the user
    pub async fn current_user(&self) -> ClientResult<User> {
        let remembered = stored_user(self.session()).ok().flatten();
        let username = remembered.as_ref().map(|user| user.username.clone());
        let user = self.lookup_user(username.as_deref()).await?;
        if remembered.as_ref() != Some(&user) {
            self.session()
                .set(SessionKey::User, &serde_json::to_string(&user)?)?;
        }
        Ok(user)
    }

    /// Find the signed-in user among the visible users.
    ///
    /// The access token's `user_id` claim decides when present, then an exact
    /// username match. The first row is taken only when neither is known.
    async fn lookup_user(&self, username: Option<&str>) -> ClientResult<User> {
        let query = match username {
            Some(name) => ListQuery::new().search(name),
            None => ListQuery::new(),
        };
        let users = self.resource::<Users>().list_fresh(&query).await?;
        let user_id = self.token_user_id();

        let found = match (user_id, username) {
            (Some(id), _) => users.into_iter().find(|user| user.id == id),
            (None, Some(name)) => users.into_iter().find(|user| user.username == name),
            (None, None) => users.into_iter().next(),
        };
        found.ok_or_else(|| {
            warn!(
                "No user matching id {:?} or username {:?} in the users list",
                user_id, username
            );
            ClientError::Unauthorized
        })
    }

    fn token_user_id(&self) -> Option<Id> {
        let access = self.session().get(SessionKey::Access)?;
        token::read_claims(&access).ok()?.user_id
    }
}
