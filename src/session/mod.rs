//! Authentication session state machine.
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` is the single owner of who-is-logged-in state. It is
//! hydrated once from the persisted token, and after that only `login`,
//! `register`, and `logout` change it. All mutation goes through
//! `&mut self`, so overlapping writes cannot interleave; the last
//! completed login wins both in memory and in the token store.
//!
//! STATE
//! =====
//! - Phase: `Loading` until the first `hydrate` finishes, `Ready` after,
//!   never back. Login and logout do not touch the phase.
//! - Identity: `user`/`token` are both set (authenticated) or both empty
//!   (anonymous). Hydration failures resolve to anonymous, never to an
//!   error, so callers can always render something.

pub mod token_store;

use std::sync::Arc;

use thiserror::Error;

use crate::api::types::{LoginRequest, RegisterRequest, TokenResponse, User};
use crate::api::{self, ApiClient, ApiError};
use token_store::TokenStore;

/// Whether the session has been restored from persistent storage yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Hydration has not completed; identity is not yet trustworthy.
    Loading,
    /// Hydration finished; identity reflects the persisted token's fate.
    Ready,
}

/// Errors from session mutations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend rejected the call; the message is display-ready.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The token could not be written to durable storage. The session is
    /// left unchanged so a retry starts from the same state.
    #[error("could not persist session token: {0}")]
    Persist(#[from] std::io::Error),
}

/// Client-side authentication state: the current user, their bearer
/// token, and whether hydration has run.
pub struct SessionStore {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    user: Option<User>,
    token: Option<String>,
    phase: SessionPhase,
}

impl SessionStore {
    /// Start a session in the `Loading` phase, sharing the client's
    /// token store so logins are visible to subsequent API calls.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let tokens = api.token_store();
        Self { api, tokens, user: None, token: None, phase: SessionPhase::Loading }
    }

    /// Restore the session from the persisted token, then mark it ready.
    ///
    /// With no persisted token this resolves straight to anonymous. With
    /// one, the token is validated against `/auth/me`; a rejected token
    /// is removed from storage so the next start does not retry it.
    /// Repeat calls after the first are no-ops.
    ///
    /// This never fails: hydration problems are logged and resolve to an
    /// anonymous ready session.
    pub async fn hydrate(&mut self) {
        if self.phase == SessionPhase::Ready {
            tracing::debug!("session already hydrated");
            return;
        }
        let Some(token) = self.tokens.load() else {
            tracing::debug!("no persisted session token; starting anonymous");
            self.phase = SessionPhase::Ready;
            return;
        };
        self.token = Some(token.clone());
        match api::auth::me(&self.api, Some(&token)).await {
            Ok(user) => {
                tracing::debug!(user = %user.email, "session restored from persisted token");
                self.user = Some(user);
            }
            Err(error) => {
                tracing::info!(error = %error, "persisted session token rejected; discarding it");
                self.tokens.clear();
                self.token = None;
                self.user = None;
            }
        }
        self.phase = SessionPhase::Ready;
    }

    /// Exchange credentials for a session via `POST /auth/login`.
    ///
    /// On success the token is persisted before the in-memory state
    /// changes; on any failure the session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` when the backend rejects the
    /// credentials and `SessionError::Persist` when the token cannot be
    /// written.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, SessionError> {
        let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let response = api::auth::login(&self.api, &request).await?;
        self.install(response)
    }

    /// Create a company plus its first user via `POST /auth/register` and
    /// log in as that user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` when the backend rejects the request
    /// (for example, an already registered email) and
    /// `SessionError::Persist` when the token cannot be written.
    pub async fn register(
        &mut self,
        company_name: &str,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let request = RegisterRequest {
            company_name: company_name.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let response = api::auth::register(&self.api, &request).await?;
        self.install(response)
    }

    /// Drop the session: remove the persisted token and forget the user.
    ///
    /// Purely local (no backend call), synchronous, and idempotent;
    /// logging out while anonymous is a no-op.
    pub fn logout(&mut self) {
        self.tokens.clear();
        self.token = None;
        self.user = None;
    }

    /// Current phase of the session lifecycle.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether hydration has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    /// Whether a user is currently logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The session's bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The API client this session authenticates against.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Token first, state second: if the write fails the session is
    /// untouched and the caller sees the failure.
    fn install(&mut self, response: TokenResponse) -> Result<User, SessionError> {
        self.tokens.save(&response.access_token)?;
        self.token = Some(response.access_token);
        self.user = Some(response.user.clone());
        Ok(response.user)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
