//! HTTP handlers for the `/api/auth/*` surface

use crate::api::server::SharedState;
use crate::auth::models::{Account, AuthResponse, SignInRequest, SignUpRequest, User};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthContext;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{self, HeaderMap};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use crate::error::{Error, Result};

const MIN_PASSWORD_LENGTH: usize = 8;

/// Single wildcard handler for every auth endpoint, dispatched on
/// `(method, sub-path)`
pub async fn handle(
    State(state): State<SharedState>,
    Path(path): Path<String>,
    Extension(auth): Extension<AuthContext>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    match (method, path.as_str()) {
        (Method::POST, "sign-up/email") => sign_up_email(&state, &headers, &body).await,
        (Method::POST, "sign-in/email") => sign_in_email(&state, &headers, &body).await,
        (Method::POST, "sign-out") => sign_out(&state, &headers).await,
        (Method::GET, "get-session") => get_session(&auth),
        _ => Err(Error::NotFound(format!("auth endpoint '{}'", path))),
    }
}

async fn sign_up_email(state: &SharedState, headers: &HeaderMap, body: &Bytes) -> Result<Response> {
    let req: SignUpRequest = serde_json::from_slice(body)?;

    if req.password.len() < MIN_PASSWORD_LENGTH {
        return Err(Error::InvalidRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if state.store.user_by_email(&req.email).await?.is_some() {
        return Err(Error::UserAlreadyExists(req.email));
    }

    let user = User::new(req.name, req.email);
    let password_hash = hash_password(&req.password, state.config.auth.bcrypt_cost)?;

    state.store.create_user(&user).await?;
    state
        .store
        .create_account(&Account::credential(user.id.clone(), password_hash))
        .await?;

    tracing::info!("New user signed up: {}", user.email);
    issue_session(state, headers, user).await
}

async fn sign_in_email(state: &SharedState, headers: &HeaderMap, body: &Bytes) -> Result<Response> {
    let req: SignInRequest = serde_json::from_slice(body)?;

    let user = state
        .store
        .user_by_email(&req.email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    let account = state
        .store
        .credential_account(&user.id)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    let hash = account.password.as_deref().ok_or(Error::InvalidCredentials)?;
    if !verify_password(&req.password, hash)? {
        return Err(Error::InvalidCredentials);
    }

    issue_session(state, headers, user).await
}

async fn sign_out(state: &SharedState, headers: &HeaderMap) -> Result<Response> {
    if let Some(token) =
        crate::auth::extract_session_token(headers, state.sessions.cookie_name())
    {
        state.sessions.delete_session(&token).await?;
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Json(serde_json::json!({ "success": true })),
    )
        .into_response())
}

/// Returns `{session, user}` for an authenticated request, JSON `null` otherwise
fn get_session(auth: &AuthContext) -> Result<Response> {
    Ok(Json(auth.session()).into_response())
}

/// Create a session for the user and respond with the token, user and cookie
async fn issue_session(state: &SharedState, headers: &HeaderMap, user: User) -> Result<Response> {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string());
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let session = state
        .sessions
        .create_session(&user, ip_address, user_agent)
        .await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, state.sessions.session_cookie(&session.token))],
        Json(AuthResponse {
            token: session.token.clone(),
            user,
        }),
    )
        .into_response())
}
