//! End-to-end tests against a live server
//!
//! These require a running PostgreSQL instance (DATABASE_URL).
//! Run with: cargo test --test e2e_tests -- --ignored --test-threads=1

use std::time::Duration;
use tokio::time::sleep;

use stackpad::api::run_server;
use stackpad::config::Config;

/// Start the server in the background on the given port
async fn start_test_server(config: Config, port: u16) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let _ = run_server(config, "127.0.0.1", port).await;
    })
}

/// Wait for the liveness endpoint to answer
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = reqwest::Client::new();
    for attempt in 0..max_attempts {
        match client
            .get(format!("http://127.0.0.1:{}/", port))
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => return true,
            _ => {
                if attempt < max_attempts - 1 {
                    sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
    false
}

#[tokio::test]
#[ignore] // Needs PostgreSQL
async fn test_liveness_and_health_check() {
    let config = Config::default();
    let port = 4101u16;

    let _server = start_test_server(config, port).await;
    assert!(wait_for_server(port, 50).await, "Server failed to start");

    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("http://127.0.0.1:{}/", port))
        .send()
        .await
        .expect("Liveness request failed")
        .json()
        .await
        .expect("Liveness body should be JSON");
    assert_eq!(body["status"], "ok");

    let body: serde_json::Value = client
        .post(format!("http://127.0.0.1:{}/rpc/health_check", port))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("RPC request failed")
        .json()
        .await
        .expect("RPC body should be JSON");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore] // Needs PostgreSQL
async fn test_sign_up_and_get_session() {
    let config = Config::default();
    let port = 4102u16;

    let _server = start_test_server(config, port).await;
    assert!(wait_for_server(port, 50).await, "Server failed to start");

    let client = reqwest::Client::new();
    let email = format!("e2e-{}@example.com", uuid::Uuid::new_v4());

    let response = client
        .post(format!("http://127.0.0.1:{}/api/auth/sign-up/email", port))
        .json(&serde_json::json!({
            "name": "E2E",
            "email": email,
            "password": "password123",
        }))
        .send()
        .await
        .expect("Sign-up request failed");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Sign-up body should be JSON");
    let token = body["token"].as_str().expect("Sign-up should return a token");

    let body: serde_json::Value = client
        .get(format!("http://127.0.0.1:{}/api/auth/get-session", port))
        .bearer_auth(token)
        .send()
        .await
        .expect("get-session request failed")
        .json()
        .await
        .expect("get-session body should be JSON");
    assert_eq!(body["user"]["email"], email.as_str());
}
