//! In-memory store used by tests and local experimentation

use crate::auth::models::{Account, Session, User};
use crate::db::AuthStore;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    /// user id -> user
    users: HashMap<String, User>,
    /// account id -> account
    accounts: HashMap<String, Account>,
    /// session token -> session
    sessions: HashMap<String, Session>,
}

/// [`AuthStore`] backed by in-process hash maps
pub struct MemoryAuthStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryAuthStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    /// Number of live sessions, for tests
    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

impl Default for MemoryAuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryAuthStore {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
        }
    }
}

#[async_trait]
impl AuthStore for MemoryAuthStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        self.tables
            .write()
            .await
            .users
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn create_account(&self, account: &Account) -> Result<()> {
        self.tables
            .write()
            .await
            .accounts
            .insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn credential_account(&self, user_id: &str) -> Result<Option<Account>> {
        Ok(self
            .tables
            .read()
            .await
            .accounts
            .values()
            .find(|a| {
                a.user_id == user_id && a.provider_id == crate::auth::models::CREDENTIAL_PROVIDER
            })
            .cloned())
    }

    async fn create_session(&self, session: &Session) -> Result<()> {
        self.tables
            .write()
            .await
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn session_by_token(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.tables.read().await.sessions.get(token).cloned())
    }

    async fn delete_session(&self, token: &str) -> Result<()> {
        self.tables.write().await.sessions.remove(token);
        Ok(())
    }

    async fn delete_expired_sessions(&self) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        let now = Utc::now();
        tables.sessions.retain(|_, s| s.expires_at > now);
        Ok((before - tables.sessions.len()) as u64)
    }
}
