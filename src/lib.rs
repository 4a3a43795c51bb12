//! Stackpad - full-stack web application starter
//!
//! Auth (credential storage, session issuance, cookie handling), an RPC
//! endpoint, PostgreSQL persistence and server-rendered pages, in one binary.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod rpc;
pub mod ui;

pub use config::Config;
pub use error::Error;
