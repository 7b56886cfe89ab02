//! Session context passed explicitly to everything that talks to the backend.
//!
//! One strategy: the signed-in user's token lives in memory as a bearer
//! token. Nothing is written to disk or shared across sessions.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::config::non_empty_env;

/// Credentials attached to backend requests.
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<SessionInner>>,
}

#[derive(Default)]
struct SessionInner {
    token: Option<SecretString>,
    role: Option<String>,
}

impl SessionContext {
    /// Empty (signed-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already holding a token, e.g. from `CANDIDATE_API_TOKEN`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                token: Some(SecretString::from(token)),
                role: None,
            })),
        }
    }

    pub fn from_env() -> Self {
        match non_empty_env("CANDIDATE_API_TOKEN") {
            Some(token) => Self::with_token(token),
            None => Self::new(),
        }
    }

    /// Store the token (and role, if the login response carried one).
    pub async fn sign_in(&self, token: SecretString, role: Option<String>) {
        let mut inner = self.inner.write().await;
        inner.token = Some(token);
        inner.role = role;
        tracing::debug!(role = ?inner.role, "Session signed in");
    }

    pub async fn sign_out(&self) {
        let mut inner = self.inner.write().await;
        inner.token = None;
        inner.role = None;
        tracing::debug!("Session signed out");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.token.is_some()
    }

    pub async fn role(&self) -> Option<String> {
        self.inner.read().await.role.clone()
    }

    /// `Authorization` header value, when signed in.
    pub async fn authorization(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .token
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
