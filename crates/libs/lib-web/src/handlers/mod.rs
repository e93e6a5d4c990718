//! # HTTP Request Handlers
//!
//! Axum HTTP request handlers organized by feature domain.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: Google sign-in and session endpoints
//!   - `GET /auth/login` - Redirect to Google consent
//!   - `GET /auth/callback` - Complete sign-in, start a session
//!   - `GET /auth/me` - Current user
//!   - `POST /auth/logout` - End the session
//!
//! - **[`course`]**: Courses of the signed-in user
//!   - `GET /course`, `POST /course`
//!   - `GET /course/{id}`, `PUT /course/{id}`, `DELETE /course/{id}`
//!
//! - **[`setup`]**: Administration
//!   - `POST /setup_db` - Create missing tables
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`; [`AppError`] renders the HTTP status
//! and a `{"detail": ...}` body.

pub mod auth;
pub mod course;
pub mod setup;

use lib_core::AppError;

/// Map an authentication library error onto the HTTP error taxonomy.
pub(crate) fn auth_error(err: lib_auth::Error) -> AppError {
    match err {
        lib_auth::Error::Session(e) => AppError::Session(e.to_string()),
        lib_auth::Error::TokenExchange(_) | lib_auth::Error::Profile(_) => {
            AppError::OAuth(err.to_string())
        }
        lib_auth::Error::InvalidUrl(_) | lib_auth::Error::HttpClient(_) => {
            AppError::Config(err.to_string())
        }
    }
}
