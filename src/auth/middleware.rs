//! Session attachment middleware and token extraction

use crate::api::server::SharedState;
use crate::auth::models::SessionContext;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

/// Per-request session context. Always present in request extensions once
/// [`attach_session`] has run; `None` inside means unauthenticated.
#[derive(Debug, Clone)]
pub struct AuthContext(pub Option<SessionContext>);

impl AuthContext {
    pub fn session(&self) -> Option<&SessionContext> {
        self.0.as_ref()
    }
}

/// Extract the session token from a request
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    // Try the Authorization header first
    if let Some(auth_header) = headers.get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    // Then the session cookie
    let prefix = format!("{}=", cookie_name);
    if let Some(cookie_header) = headers.get("Cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                if let Some(token) = cookie.trim().strip_prefix(&prefix) {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Middleware that resolves the session token and attaches the resulting
/// `(session, user)` pair to the request extensions.
///
/// Fail-open: a store error leaves the request unauthenticated rather than
/// failing it.
pub async fn attach_session(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = match extract_session_token(req.headers(), state.sessions.cookie_name()) {
        Some(token) => match state.sessions.resolve(&token).await {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!("Session lookup failed, continuing unauthenticated: {}", e);
                None
            }
        },
        None => None,
    };

    req.extensions_mut().insert(AuthContext(ctx));
    next.run(req).await
}
