//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provider id used for email/password credential accounts
pub const CREDENTIAL_PROVIDER: &str = "credential";

/// User identity record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address used for sign-in (unique)
    pub email: String,
    /// Whether the email address has been verified
    pub email_verified: bool,
    /// Optional avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new unverified user
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            email_verified: false,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Links a user to a credential provider. For email/password accounts the
/// provider is [`CREDENTIAL_PROVIDER`] and `password` holds the bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    /// Provider-scoped account identifier (the user id for credential accounts)
    pub account_id: String,
    pub provider_id: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a credential account carrying a password hash
    pub fn credential(user_id: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: user_id.clone(),
            user_id,
            provider_id: CREDENTIAL_PROVIDER.to_string(),
            password: Some(password_hash),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Session record: an opaque token bound to one user with an expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// Opaque session token carried by the cookie
    #[serde(skip_serializing)]
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session has passed its expiry timestamp
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// An authenticated session together with its user, as attached to requests
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    pub session: Session,
    pub user: User,
}

/// Sign-up request body for `POST /api/auth/sign-up/email`
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign-in request body for `POST /api/auth/sign-in/email`
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response for successful sign-up / sign-in
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_user_is_unverified() {
        let user = User::new("Alice".to_string(), "alice@example.com".to_string());
        assert!(!user.email_verified);
        assert!(user.image.is_none());
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_credential_account_links_user() {
        let account = Account::credential("user-1".to_string(), "$2b$12$hash".to_string());
        assert_eq!(account.user_id, "user-1");
        assert_eq!(account.account_id, "user-1");
        assert_eq!(account.provider_id, CREDENTIAL_PROVIDER);
        assert!(account.password.is_some());
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let mut session = Session {
            id: "s1".to_string(),
            token: "tok".to_string(),
            user_id: "u1".to_string(),
            expires_at: now + Duration::days(7),
            ip_address: None,
            user_agent: None,
            created_at: now,
            updated_at: now,
        };
        assert!(!session.is_expired());

        session.expires_at = now - Duration::seconds(1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_session_token_not_serialized() {
        let now = Utc::now();
        let session = Session {
            id: "s1".to_string(),
            token: "secret-token".to_string(),
            user_id: "u1".to_string(),
            expires_at: now,
            ip_address: None,
            user_agent: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&session).expect("Failed to serialize");
        assert!(!json.contains("secret-token"));
        assert!(json.contains("expiresAt"));
    }
}
