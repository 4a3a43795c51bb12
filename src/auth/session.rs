//! Session issuance and resolution

use crate::auth::models::{Session, SessionContext, User};
use crate::config::AuthConfig;
use crate::db::AuthStore;
use crate::error::Result;
use chrono::{Duration, Utc};
use rand::{distr::Alphanumeric, RngExt};
use std::sync::Arc;
use uuid::Uuid;

/// Length of generated session tokens
const SESSION_TOKEN_LENGTH: usize = 32;

/// Generate an opaque alphanumeric session token
pub fn generate_session_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SESSION_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Issues, resolves and revokes sessions against the backing store
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn AuthStore>,
    config: AuthConfig,
}

impl SessionManager {
    pub fn new(store: Arc<dyn AuthStore>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Name of the cookie carrying the session token
    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Session lifetime in seconds, used for the cookie Max-Age
    pub fn session_ttl_seconds(&self) -> i64 {
        Duration::days(self.config.session_ttl_days).num_seconds()
    }

    /// Create and persist a new session for a user
    pub async fn create_session(
        &self,
        user: &User,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            token: generate_session_token(),
            user_id: user.id.clone(),
            expires_at: now + Duration::days(self.config.session_ttl_days),
            ip_address,
            user_agent,
            created_at: now,
            updated_at: now,
        };
        self.store.create_session(&session).await?;
        Ok(session)
    }

    /// Resolve a token to its session and user. Expired sessions are removed
    /// and treated as absent.
    pub async fn resolve(&self, token: &str) -> Result<Option<SessionContext>> {
        let Some(session) = self.store.session_by_token(token).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.store.delete_session(token).await?;
            return Ok(None);
        }

        let Some(user) = self.store.user_by_id(&session.user_id).await? else {
            // Orphaned session, the user row is gone
            self.store.delete_session(token).await?;
            return Ok(None);
        };

        Ok(Some(SessionContext { session, user }))
    }

    /// Delete a session by token
    pub async fn delete_session(&self, token: &str) -> Result<()> {
        self.store.delete_session(token).await
    }

    /// Remove all expired sessions, returning how many were deleted
    pub async fn cleanup_expired(&self) -> Result<u64> {
        self.store.delete_expired_sessions().await
    }

    /// Build the Set-Cookie value that installs the session token
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.config.cookie_name,
            token,
            self.session_ttl_seconds()
        )
    }

    /// Build the Set-Cookie value that clears the session cookie
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.config.cookie_name
        )
    }
}
