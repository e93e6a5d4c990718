//! # Web Library
//!
//! HTTP handlers, middleware, routes, and server setup.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
pub(crate) mod test_utils;

pub use server::{build_router, start_server, AppState, ServerConfig, SharedOAuth};
