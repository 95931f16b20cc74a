//! Session bootstrap and the current-user store.
//!
//! ```text
//! Uninitialized ──bootstrap──> CheckingSession ──/auth/me ok──> Authenticated
//!                                     │
//!                                     └──────── /auth/me failed ──> Anonymous
//! ```
//!
//! While the probe is in flight the cached user (if any) is shown
//! optimistically. Login and logout move between the two terminal states;
//! logout always clears local state, even when the backend call fails.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::models::{LoginRequest, User};

/// What the session cache file holds between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedSession {
    pub user: User,
    /// `Cookie` header value the backend issued at login.
    #[serde(default)]
    pub cookie: Option<String>,
    pub saved_at: DateTime<Utc>,
}

pub trait SessionCache: Send + Sync {
    fn load(&self) -> Option<CachedSession>;
    fn store(&self, session: &CachedSession) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

/// JSON file in the user's cache directory.
#[derive(Debug, Clone)]
pub struct FileSessionCache {
    path: PathBuf,
}

impl FileSessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionCache for FileSessionCache {
    fn load(&self) -> Option<CachedSession> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session cache");
                None
            }
        }
    }

    fn store(&self, session: &CachedSession) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// The backend calls the session store needs. Real implementation:
/// `ApiClient`.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn me(&self) -> Result<User, ClientError>;
    async fn login(&self, credentials: &LoginRequest) -> Result<User, ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;

    fn session_cookie(&self) -> Option<String> {
        None
    }

    fn restore_session_cookie(&self, _header: &str) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    CheckingSession,
    Authenticated(User),
    Anonymous,
}

pub struct SessionStore<A, C> {
    api: A,
    cache: C,
    state: SessionState,
    optimistic: Option<User>,
}

impl<A: AuthApi, C: SessionCache> SessionStore<A, C> {
    pub fn new(api: A, cache: C) -> Self {
        Self {
            api,
            cache,
            state: SessionState::Uninitialized,
            optimistic: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// False until bootstrap has reached a terminal state.
    pub fn is_ready(&self) -> bool {
        matches!(
            self.state,
            SessionState::Authenticated(_) | SessionState::Anonymous
        )
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::CheckingSession => self.optimistic.as_ref(),
            _ => None,
        }
    }

    /// Restore the cached session, then confirm it against `/auth/me`.
    pub async fn bootstrap(&mut self) -> &SessionState {
        self.state = SessionState::CheckingSession;
        if let Some(cached) = self.cache.load() {
            if let Some(cookie) = cached.cookie.as_deref() {
                self.api.restore_session_cookie(cookie);
            }
            tracing::debug!(user = %cached.user.name, "using cached session while probing");
            self.optimistic = Some(cached.user);
        }

        match self.api.me().await {
            Ok(user) => self.authenticate(user),
            Err(err) if err.is_cancelled() => {
                self.state = match self.optimistic.take() {
                    Some(user) => SessionState::Authenticated(user),
                    None => SessionState::Anonymous,
                };
            }
            Err(err) => {
                tracing::info!(error = %err, "no active session");
                self.clear_local();
            }
        }
        &self.state
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ClientError> {
        let mut missing = Vec::new();
        if email.trim().is_empty() {
            missing.push("email".to_string());
        }
        if password.is_empty() {
            missing.push("password".to_string());
        }
        if !missing.is_empty() {
            return Err(ClientError::Validation { fields: missing });
        }

        let credentials = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.api.login(&credentials).await {
            Ok(user) => {
                self.authenticate(user.clone());
                tracing::info!(user = %user.name, "logged in");
                Ok(user)
            }
            Err(err) => {
                if !matches!(self.state, SessionState::Authenticated(_)) {
                    self.state = SessionState::Anonymous;
                }
                Err(err)
            }
        }
    }

    /// Best-effort backend logout; local state is cleared regardless.
    pub async fn logout(&mut self) {
        if let Err(err) = self.api.logout().await {
            tracing::warn!(error = %err, "logout request failed, clearing local session anyway");
        }
        self.clear_local();
    }

    fn authenticate(&mut self, user: User) {
        let session = CachedSession {
            user: user.clone(),
            cookie: self.api.session_cookie(),
            saved_at: Utc::now(),
        };
        if let Err(e) = self.cache.store(&session) {
            tracing::warn!(error = %e, "failed to write session cache");
        }
        self.optimistic = None;
        self.state = SessionState::Authenticated(user);
    }

    fn clear_local(&mut self) {
        if let Err(e) = self.cache.clear() {
            tracing::warn!(error = %e, "failed to clear session cache");
        }
        self.optimistic = None;
        self.state = SessionState::Anonymous;
    }
}
