//! Web UI handlers

use axum::extract::State;
use axum::response::Html;
use axum::Extension;
use minijinja::context;

use crate::api::server::SharedState;
use crate::auth::AuthContext;
use crate::error::Result;

/// Login page
pub async fn login_page(State(state): State<SharedState>) -> Result<Html<String>> {
    let html = state
        .templates
        .get_template("login.html")?
        .render(context! {})?;
    Ok(Html(html))
}

/// Signup page
pub async fn signup_page(State(state): State<SharedState>) -> Result<Html<String>> {
    let html = state
        .templates
        .get_template("signup.html")?
        .render(context! {})?;
    Ok(Html(html))
}

/// Dashboard page - session and user details when signed in, a prompt otherwise
pub async fn dashboard(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Html<String>> {
    let template = state.templates.get_template("dashboard.html")?;

    let html = match auth.session() {
        Some(ctx) => template.render(context! {
            user => ctx.user,
            session => ctx.session,
        })?,
        None => template.render(context! {})?,
    };

    Ok(Html(html))
}
