//! JSON-RPC client for the running server instance.
//!
//! Two admin endpoints are used: `/web/session/authenticate` to obtain the
//! admin uid, and `/jsonrpc` for `execute_kw` calls (field metadata and
//! module state). Everything is synchronous; the cleanup makes a handful
//! of small requests.

mod client;
mod types;

pub use client::RpcClient;
pub use types::RpcRequest;
