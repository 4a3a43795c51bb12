//! Authentication and session management

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod session;

pub use middleware::{attach_session, extract_session_token, AuthContext};
pub use models::{Account, Session, SessionContext, User};
pub use password::{hash_password, verify_password};
pub use session::{generate_session_token, SessionManager};
