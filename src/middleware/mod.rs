//! Middleware layer.
//!
//! Cross-cutting concerns applied by the [`Router`](crate::Router) around
//! every handler call:
//!
//! - [`cors`]: answers preflight requests and stamps `access-control-*`
//!   headers on every response. Opt in with [`Router::cors`](crate::Router::cors).
//! - `trace`: one span per request carrying method and path, closed with the
//!   final status and latency. Always on.

pub mod cors;
pub(crate) mod trace;

pub use cors::Cors;
