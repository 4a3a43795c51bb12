//! PostgreSQL-backed store

use crate::auth::models::{Account, Session, User};
use crate::db::AuthStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::{Client, NoTls, Row};

/// Handle to the PostgreSQL connection
#[derive(Clone)]
pub struct Database {
    client: Arc<Client>,
}

impl Database {
    /// Connect to PostgreSQL and spawn the connection task
    pub async fn connect(url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// [`AuthStore`] over the PostgreSQL auth tables
#[derive(Clone)]
pub struct PostgresAuthStore {
    db: Database,
}

impl PostgresAuthStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        email_verified: row.get("email_verified"),
        image: row.get("image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn account_from_row(row: &Row) -> Account {
    Account {
        id: row.get("id"),
        user_id: row.get("user_id"),
        account_id: row.get("account_id"),
        provider_id: row.get("provider_id"),
        password: row.get("password"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn session_from_row(row: &Row) -> Session {
    Session {
        id: row.get("id"),
        token: row.get("token"),
        user_id: row.get("user_id"),
        expires_at: row.get("expires_at"),
        ip_address: row.get("ip_address"),
        user_agent: row.get("user_agent"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl AuthStore for PostgresAuthStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        self.db
            .client()
            .execute(
                r#"INSERT INTO "user" (id, name, email, email_verified, image, created_at, updated_at)
                   VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
                &[
                    &user.id,
                    &user.name,
                    &user.email,
                    &user.email_verified,
                    &user.image,
                    &user.created_at,
                    &user.updated_at,
                ],
            )
            .await?;
        Ok(())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = self
            .db
            .client()
            .query_opt(r#"SELECT * FROM "user" WHERE email = $1"#, &[&email])
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = self
            .db
            .client()
            .query_opt(r#"SELECT * FROM "user" WHERE id = $1"#, &[&id])
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn create_account(&self, account: &Account) -> Result<()> {
        self.db
            .client()
            .execute(
                r#"INSERT INTO account (id, user_id, account_id, provider_id, password, created_at, updated_at)
                   VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
                &[
                    &account.id,
                    &account.user_id,
                    &account.account_id,
                    &account.provider_id,
                    &account.password,
                    &account.created_at,
                    &account.updated_at,
                ],
            )
            .await?;
        Ok(())
    }

    async fn credential_account(&self, user_id: &str) -> Result<Option<Account>> {
        let row = self
            .db
            .client()
            .query_opt(
                "SELECT * FROM account WHERE user_id = $1 AND provider_id = $2",
                &[&user_id, &crate::auth::models::CREDENTIAL_PROVIDER],
            )
            .await?;
        Ok(row.as_ref().map(account_from_row))
    }

    async fn create_session(&self, session: &Session) -> Result<()> {
        self.db
            .client()
            .execute(
                r#"INSERT INTO session (id, token, user_id, expires_at, ip_address, user_agent, created_at, updated_at)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
                &[
                    &session.id,
                    &session.token,
                    &session.user_id,
                    &session.expires_at,
                    &session.ip_address,
                    &session.user_agent,
                    &session.created_at,
                    &session.updated_at,
                ],
            )
            .await?;
        Ok(())
    }

    async fn session_by_token(&self, token: &str) -> Result<Option<Session>> {
        let row = self
            .db
            .client()
            .query_opt("SELECT * FROM session WHERE token = $1", &[&token])
            .await?;
        Ok(row.as_ref().map(session_from_row))
    }

    async fn delete_session(&self, token: &str) -> Result<()> {
        self.db
            .client()
            .execute("DELETE FROM session WHERE token = $1", &[&token])
            .await?;
        Ok(())
    }

    async fn delete_expired_sessions(&self) -> Result<u64> {
        let deleted = self
            .db
            .client()
            .execute("DELETE FROM session WHERE expires_at <= now()", &[])
            .await?;
        Ok(deleted)
    }
}
