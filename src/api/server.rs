//! HTTP server assembly

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{any, get};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{self, SessionManager};
use crate::config::{Config, CorsConfig};
use crate::db::{migrations, AuthStore, Database, PostgresAuthStore};
use crate::error::Result;
use crate::rpc::{self, ProcedureRegistry};
use crate::ui;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn AuthStore>,
    pub sessions: SessionManager,
    pub procedures: ProcedureRegistry,
    pub templates: minijinja::Environment<'static>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build shared state over any [`AuthStore`] implementation
    pub fn new(config: Config, store: Arc<dyn AuthStore>) -> Result<SharedState> {
        let sessions = SessionManager::new(store.clone(), config.auth.clone());
        let templates = ui::templates::environment()?;

        Ok(Arc::new(Self {
            config,
            store,
            sessions,
            procedures: ProcedureRegistry::builtin(),
            templates,
        }))
    }
}

/// Run the HTTP server against PostgreSQL
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let db = Database::connect(&config.database.url).await?;
    // Schema creation is idempotent, safe to run on every boot
    migrations::run(&db).await?;

    let store = Arc::new(PostgresAuthStore::new(db));
    let state = AppState::new(config, store)?;

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes and the middleware chain.
///
/// Execution order per request: trace, CORS, session attachment, RPC
/// dispatch, then routing.
pub fn create_router(state: SharedState) -> Router {
    let cors = build_cors(&state.config.cors);

    Router::new()
        // Liveness
        .route("/", get(routes::root))
        // Auth endpoints, one wildcard route
        .route("/api/auth/{*path}", any(auth::handlers::handle))
        // Browser pages
        .route("/login", get(ui::login_page))
        .route("/signup", get(ui::signup_page))
        .route("/dashboard", get(ui::dashboard))
        .fallback(routes::not_found)
        // Middleware (outermost last)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rpc::rpc_dispatch,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::attach_session,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer for credentialed browser clients
fn build_cors(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}
