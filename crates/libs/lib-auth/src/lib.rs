//! # Authentication Library
//!
//! Google sign-in (OAuth 2.0 authorization code flow) and cookie session helpers.

pub mod error;
pub mod google;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use google::{GoogleOAuth, GoogleProfile, LoginRedirect, OAuthProvider};
pub use session::{signing_key, PendingLogin};
