//! Procedure registry and the built-in placeholder procedures

use crate::auth::models::SessionContext;
use crate::error::{Error, Result};
use futures_util::future::BoxFuture;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Context a procedure runs with: the request's optional `(session, user)` pair
#[derive(Debug, Clone, Default)]
pub struct RpcContext {
    pub auth: Option<SessionContext>,
}

impl RpcContext {
    pub fn authenticated(auth: SessionContext) -> Self {
        Self { auth: Some(auth) }
    }

    /// The session context, or `Unauthorized` when the request carries none
    pub fn require_session(&self) -> Result<&SessionContext> {
        self.auth.as_ref().ok_or(Error::Unauthorized)
    }
}

type Handler = Arc<dyn Fn(Value, RpcContext) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

struct Procedure {
    protected: bool,
    handler: Handler,
}

/// Named, stateless procedures, registered once at process start
pub struct ProcedureRegistry {
    procedures: HashMap<String, Procedure>,
}

impl ProcedureRegistry {
    pub fn new() -> Self {
        Self {
            procedures: HashMap::new(),
        }
    }

    /// Registry with the starter's placeholder procedures
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register("health_check", false, |_input, _ctx| async {
            Ok(serde_json::json!({
                "status": "healthy",
                "message": "Server is running and healthy",
            }))
        });

        registry.register("hello", true, |_input, ctx| async move {
            let user = &ctx.require_session()?.user;
            Ok(Value::String(format!(
                "Hello {}, the server is up and running.",
                user.name
            )))
        });

        registry
    }

    /// Register a procedure. Protected procedures reject requests without an
    /// authenticated session before the handler runs.
    pub fn register<F, Fut>(&mut self, name: &str, protected: bool, handler: F)
    where
        F: Fn(Value, RpcContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |input, ctx| Box::pin(handler(input, ctx)));
        self.procedures
            .insert(name.to_string(), Procedure { protected, handler });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.procedures.keys().map(String::as_str)
    }

    /// Invoke a procedure by name
    pub async fn dispatch(&self, name: &str, input: Value, ctx: RpcContext) -> Result<Value> {
        let procedure = self
            .procedures
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("procedure '{}'", name)))?;

        if procedure.protected && ctx.auth.is_none() {
            return Err(Error::Unauthorized);
        }

        (procedure.handler)(input, ctx).await
    }
}

impl Default for ProcedureRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
