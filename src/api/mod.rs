//! HTTP server

pub mod routes;
pub mod server;

pub use server::*;
