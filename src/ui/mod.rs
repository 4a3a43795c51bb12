//! Server-rendered browser pages

pub mod handlers;
pub mod templates;

pub use handlers::{dashboard, login_page, signup_page};
