//! Remote-procedure endpoint

pub mod dispatch;
pub mod procedures;

pub use dispatch::rpc_dispatch;
pub use procedures::{ProcedureRegistry, RpcContext};
