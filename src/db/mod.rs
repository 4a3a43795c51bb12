//! Persistence layer for the authentication tables

pub mod memory;
pub mod migrations;
pub mod postgres;

pub use memory::MemoryAuthStore;
pub use postgres::{Database, PostgresAuthStore};

use crate::auth::models::{Account, Session, User};
use crate::error::Result;
use async_trait::async_trait;

/// Storage operations the auth subsystem needs. Implemented by
/// [`PostgresAuthStore`] for production and [`MemoryAuthStore`] for tests.
#[async_trait]
pub trait AuthStore: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<()>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn user_by_id(&self, id: &str) -> Result<Option<User>>;

    async fn create_account(&self, account: &Account) -> Result<()>;
    /// Find the email/password credential account for a user
    async fn credential_account(&self, user_id: &str) -> Result<Option<Account>>;

    async fn create_session(&self, session: &Session) -> Result<()>;
    async fn session_by_token(&self, token: &str) -> Result<Option<Session>>;
    async fn delete_session(&self, token: &str) -> Result<()>;
    async fn delete_expired_sessions(&self) -> Result<u64>;
}
