//! Client-side authentication state.
//!
//! [`AuthClient`] talks to the backend through an [`AuthApi`], keeps the
//! session in a [`SessionStore`] and exposes the current [`AuthState`] to the
//! route guard. Failures never escape as errors: login and signup report a
//! plain `bool` and log the cause.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use engine::User;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    client::ClientError,
    session::{Session, SessionStore},
};

/// Backend calls the auth client needs. Both return the raw bearer token.
pub trait AuthApi {
    async fn login(&self, username: &str, password: &str) -> Result<String, ClientError>;
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    LoggedOut,
    LoggedIn(User),
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    Malformed,
    #[error("payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not the expected JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    #[serde(rename = "userId")]
    user_id: String,
}

/// Reads `userId` from the middle segment of a JWT.
///
/// The signature is not checked: the identity is only used for display and
/// the server verifies every token it receives.
pub fn token_user_id(token: &str) -> Result<String, TokenError> {
    let payload = token.split('.').nth(1).ok_or(TokenError::Malformed)?;
    // Tolerate padded encoders.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let payload: TokenPayload = serde_json::from_slice(&bytes)?;
    Ok(payload.user_id)
}

pub fn avatar_url(email: &str) -> String {
    format!("https://api.dicebear.com/7.x/initials/svg?seed={email}")
}

/// Display name for a login identifier: the part before `@`, if any.
pub fn name_from_identifier(identifier: &str) -> &str {
    identifier.split('@').next().unwrap_or(identifier)
}

pub struct AuthClient<A, S> {
    api: A,
    store: S,
    state: AuthState,
    token: Option<String>,
}

impl<A: AuthApi, S: SessionStore> AuthClient<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            state: AuthState::Loading,
            token: None,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::LoggedIn(user) => Some(user),
            AuthState::Loading | AuthState::LoggedOut => None,
        }
    }

    /// Picks up a session persisted by an earlier run.
    pub fn restore(&mut self) {
        match self.store.load() {
            Ok(Some(session)) => {
                tracing::debug!(user = %session.user.id, "session restored");
                self.token = Some(session.token);
                self.state = AuthState::LoggedIn(session.user);
            }
            Ok(None) => self.state = AuthState::LoggedOut,
            Err(err) => {
                tracing::warn!("ignoring unreadable session: {err}");
                self.state = AuthState::LoggedOut;
            }
        }
    }

    pub async fn login(&mut self, identifier: &str, password: &str) -> bool {
        let previous = std::mem::replace(&mut self.state, AuthState::Loading);
        let result = self.api.login(identifier, password).await;
        let name = name_from_identifier(identifier).to_string();
        self.finish("login", result, name, identifier, previous)
    }

    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> bool {
        let previous = std::mem::replace(&mut self.state, AuthState::Loading);
        let result = self.api.register(name, email, password).await;
        self.finish("signup", result, name.to_string(), email, previous)
    }

    fn finish(
        &mut self,
        action: &str,
        result: Result<String, ClientError>,
        name: String,
        email: &str,
        previous: AuthState,
    ) -> bool {
        let token = match result {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("{action} failed: {err}");
                self.state = previous;
                return false;
            }
        };
        let id = match token_user_id(&token) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!("{action} returned an unreadable token: {err}");
                self.state = previous;
                return false;
            }
        };

        let user = User {
            id,
            name,
            email: email.to_string(),
            avatar: Some(avatar_url(email)),
        };
        let session = Session {
            user: user.clone(),
            token,
        };
        if let Err(err) = self.store.save(&session) {
            tracing::warn!("failed to persist session: {err}");
        }

        self.token = Some(session.token);
        self.state = AuthState::LoggedIn(user);
        true
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// `Authorization` header value for authenticated requests.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user() {
            tracing::debug!(user = %user.id, "logging out");
        }
        if let Err(err) = self.store.clear() {
            tracing::warn!("failed to clear session: {err}");
        }
        self.token = None;
        self.state = AuthState::LoggedOut;
    }
}
