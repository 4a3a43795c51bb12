//! Plain API route handlers

use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::server::SharedState;
use crate::error::Error;

/// Liveness endpoint at `GET /`
pub async fn root(State(state): State<SharedState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Server is running",
        "status": "ok",
        "port": state.config.server.port,
    }))
}

/// JSON 404 for anything no route or middleware claimed
pub async fn not_found(uri: Uri) -> Response {
    Error::NotFound(uri.path().to_string()).into_response()
}
