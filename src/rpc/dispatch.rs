//! RPC dispatch middleware for the `/rpc/*` path prefix

use crate::api::server::SharedState;
use crate::auth::AuthContext;
use crate::error::Error;
use crate::rpc::procedures::RpcContext;
use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

const RPC_PREFIX: &str = "/rpc/";
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// For requests under `/rpc/`, invoke the matching procedure and return its
/// response verbatim; unmatched paths fall through to subsequent routing.
pub async fn rpc_dispatch(State(state): State<SharedState>, req: Request, next: Next) -> Response {
    let Some(name) = req.uri().path().strip_prefix(RPC_PREFIX) else {
        return next.run(req).await;
    };
    let name = name.trim_end_matches('/').to_string();

    if !state.procedures.contains(&name) {
        return next.run(req).await;
    }

    if req.method() != Method::POST && req.method() != Method::GET {
        return next.run(req).await;
    }

    // Session context was attached by the outer middleware
    let auth = req
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .unwrap_or(AuthContext(None));

    let body = match axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Error::InvalidRequest(format!("Failed to read request body: {}", e))
                .into_response()
        }
    };

    let input: Value = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => return Error::Json(e).into_response(),
        }
    };

    let ctx = RpcContext { auth: auth.0 };
    match state.procedures.dispatch(&name, input, ctx).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => e.into_response(),
    }
}
