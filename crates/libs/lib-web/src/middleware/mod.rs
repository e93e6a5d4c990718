//! # Middleware
//!
//! Axum middleware and layers for authentication, sessions, CORS, request
//! stamping, and request logging.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: Session authentication for protected routes
//! - **[`mw_session`]**: Signed cookie sessions stored in SQLite
//! - **[`mw_cors`]**: CORS policy for the frontend origin
//! - **[`mw_req_stamp`]**: Request ID and timestamp stamping
//! - **[`mw_logging`]**: Request/response logging

// region: --- Modules
pub mod mw_auth;
pub mod mw_cors;
pub mod mw_logging;
pub mod mw_req_stamp;
pub mod mw_session;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{require_auth, CurrentUser};
pub use mw_cors::cors_layer;
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_session::{session_layer, session_store, spawn_expired_deletion};
// endregion: --- Re-exports
