//! Authentication flow tests over the full router
//!
//! Sign-up, sign-in, sign-out and session attachment, driven end to end
//! against the in-memory store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use stackpad::api::server::{create_router, AppState};
use stackpad::config::Config;
use stackpad::db::MemoryAuthStore;

const COOKIE_NAME: &str = "stackpad.session_token";

fn test_router() -> Router {
    let mut config = Config::default();
    // Minimum bcrypt cost keeps the tests fast
    config.auth.bcrypt_cost = 4;

    let state = AppState::new(config, Arc::new(MemoryAuthStore::new()))
        .expect("Failed to build state");
    create_router(state)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

fn post_json(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Extract the session token from a Set-Cookie header
fn session_token(response: &axum::response::Response) -> Option<String> {
    let cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let value = cookie.strip_prefix(&format!("{}=", COOKIE_NAME))?;
    Some(value.split(';').next()?.to_string())
}

async fn sign_up(app: &Router, name: &str, email: &str, password: &str) -> axum::response::Response {
    app.clone()
        .oneshot(post_json(
            "/api/auth/sign-up/email",
            serde_json::json!({ "name": name, "email": email, "password": password }),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_sign_up_sets_session_cookie() {
    let app = test_router();

    let response = sign_up(&app, "Alice", "alice@example.com", "password123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = session_token(&response).expect("Sign-up should set a session cookie");
    assert!(!token.is_empty());

    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["emailVerified"], false);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = test_router();

    sign_up(&app, "Alice", "alice@example.com", "password123").await;
    let response = sign_up(&app, "Alice Again", "alice@example.com", "password456").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["code"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_short_password_rejected() {
    let app = test_router();

    let response = sign_up(&app, "Alice", "alice@example.com", "short").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_in_matches_created_user() {
    let app = test_router();

    let response = sign_up(&app, "Alice", "alice@example.com", "password123").await;
    let created_id = json_body(response).await["user"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/sign-in/email",
            serde_json::json!({ "email": "alice@example.com", "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let token = session_token(&response).expect("Sign-in should set a session cookie");

    // The session resolves to the same user that signed up
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/auth/get-session")
                .header("Cookie", format!("{}={}", COOKIE_NAME, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["user"]["id"], created_id.as_str());
    assert_eq!(body["session"]["userId"], created_id.as_str());
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = test_router();

    sign_up(&app, "Alice", "alice@example.com", "password123").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/sign-in/email",
            serde_json::json!({ "email": "alice@example.com", "password": "wrong-password" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_sign_in_unknown_email() {
    let app = test_router();

    let response = app
        .oneshot(post_json(
            "/api/auth/sign-in/email",
            serde_json::json!({ "email": "nobody@example.com", "password": "password123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_session_without_cookie_is_null() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::get("/api/auth/get-session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Fail-open: never an error, just an empty session context
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await.is_null());
}

/// Store whose every operation fails, to prove the middleware fails open
struct FailingStore;

#[async_trait::async_trait]
impl stackpad::db::AuthStore for FailingStore {
    async fn create_user(&self, _: &stackpad::auth::User) -> stackpad::error::Result<()> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
    async fn user_by_email(
        &self,
        _: &str,
    ) -> stackpad::error::Result<Option<stackpad::auth::User>> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
    async fn user_by_id(&self, _: &str) -> stackpad::error::Result<Option<stackpad::auth::User>> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
    async fn create_account(&self, _: &stackpad::auth::Account) -> stackpad::error::Result<()> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
    async fn credential_account(
        &self,
        _: &str,
    ) -> stackpad::error::Result<Option<stackpad::auth::Account>> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
    async fn create_session(&self, _: &stackpad::auth::Session) -> stackpad::error::Result<()> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
    async fn session_by_token(
        &self,
        _: &str,
    ) -> stackpad::error::Result<Option<stackpad::auth::Session>> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
    async fn delete_session(&self, _: &str) -> stackpad::error::Result<()> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
    async fn delete_expired_sessions(&self) -> stackpad::error::Result<u64> {
        Err(stackpad::Error::Other("store down".to_string()))
    }
}

#[tokio::test]
async fn test_session_middleware_fails_open_on_store_error() {
    let state = AppState::new(Config::default(), Arc::new(FailingStore))
        .expect("Failed to build state");
    let app = create_router(state);

    // A request carrying a session cookie proceeds unauthenticated instead
    // of failing when the store errors
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/auth/get-session")
                .header("Cookie", format!("{}=some-token", COOKIE_NAME))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await.is_null());

    // Public procedures keep working too
    let response = app
        .oneshot(
            Request::post("/rpc/health_check")
                .header("Cookie", format!("{}=some-token", COOKIE_NAME))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_session_with_bogus_token_is_null() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::get("/api/auth/get-session")
                .header("Cookie", format!("{}=forged-token", COOKIE_NAME))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await.is_null());
}

#[tokio::test]
async fn test_sign_out_invalidates_session() {
    let app = test_router();

    let response = sign_up(&app, "Alice", "alice@example.com", "password123").await;
    let token = session_token(&response).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/auth/sign-out")
                .header("Cookie", format!("{}={}", COOKIE_NAME, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The cookie is cleared
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cleared.contains("Max-Age=0"));

    // And the session no longer resolves
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/auth/get-session")
                .header("Cookie", format!("{}={}", COOKIE_NAME, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(json_body(response).await.is_null());
}

#[tokio::test]
async fn test_unknown_auth_endpoint() {
    let app = test_router();

    let response = app
        .oneshot(post_json("/api/auth/magic-link", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_procedure_with_session() {
    let app = test_router();

    let response = sign_up(&app, "Alice", "alice@example.com", "password123").await;
    let token = session_token(&response).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::post("/rpc/hello")
                .header("Cookie", format!("{}={}", COOKIE_NAME, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!("Hello Alice, the server is up and running."));
}

#[tokio::test]
async fn test_bearer_token_also_authenticates() {
    let app = test_router();

    let response = sign_up(&app, "Alice", "alice@example.com", "password123").await;
    let token = json_body(response).await["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/auth/get-session")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_dashboard_shows_user_details_when_signed_in() {
    let app = test_router();

    let response = sign_up(&app, "Alice", "alice@example.com", "password123").await;
    let token = session_token(&response).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::get("/dashboard")
                .header("Cookie", format!("{}={}", COOKIE_NAME, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("alice@example.com"));
    assert!(html.contains("Session Information"));
    assert!(!html.contains("Not Authenticated"));
}
