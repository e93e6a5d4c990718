//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//!
//! Unlike most settings, the Google OAuth credentials, the frontend URL and the
//! session secret are optional at startup: a missing value is reported with a
//! warning (see [`Config::warn_missing`]) and the server still boots. Features
//! depending on a missing value answer with an error at request time instead.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env();
//! for name in config.warn_missing() {
//!     // already logged; `name` is e.g. "SECRET_KEY"
//!     let _ = name;
//! }
//! ```

use lib_utils::envs::{get_env_opt, non_empty};
use tracing::warn;

/// Default SQLite database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/courses.db";

/// Default OAuth redirect target, matching the default bind address.
pub const DEFAULT_GOOGLE_REDIRECT_URL: &str = "http://localhost:8000/auth/callback";

/// Variables that should be present; checked in this order.
pub const REQUIRED_VARS: [&str; 4] = [
    "GOOGLE_CLIENT_SECRET",
    "GOOGLE_CLIENT_ID",
    "FRONTEND_URL",
    "SECRET_KEY",
];

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Google OAuth client id (`GOOGLE_CLIENT_ID`)
    pub google_client_id: Option<String>,

    /// Google OAuth client secret (`GOOGLE_CLIENT_SECRET`)
    pub google_client_secret: Option<String>,

    /// Where Google sends the user back after consent
    pub google_redirect_url: String,

    /// The single origin allowed by CORS, and where sign-in lands (`FRONTEND_URL`)
    pub frontend_url: Option<String>,

    /// Session cookie signing secret (`SECRET_KEY`)
    pub secret_key: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(get_env_opt)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_empty(lookup(name));

        Self {
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            google_client_id: get("GOOGLE_CLIENT_ID"),
            google_client_secret: get("GOOGLE_CLIENT_SECRET"),
            google_redirect_url: get("GOOGLE_REDIRECT_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_REDIRECT_URL.to_string()),
            frontend_url: get("FRONTEND_URL"),
            secret_key: get("SECRET_KEY"),
        }
    }

    /// Names of required variables that are missing, in [`REQUIRED_VARS`] order.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| match *name {
                "GOOGLE_CLIENT_SECRET" => self.google_client_secret.is_none(),
                "GOOGLE_CLIENT_ID" => self.google_client_id.is_none(),
                "FRONTEND_URL" => self.frontend_url.is_none(),
                "SECRET_KEY" => self.secret_key.is_none(),
                _ => false,
            })
            .collect()
    }

    /// Log a warning for every missing required variable.
    ///
    /// Never fails; returns the names that were reported.
    pub fn warn_missing(&self) -> Vec<&'static str> {
        let missing = self.missing_vars();
        for name in &missing {
            warn!("{} is not set.", name);
        }
        missing
    }

    /// Where to send the browser after a completed sign-in.
    pub fn post_login_redirect(&self) -> &str {
        self.frontend_url.as_deref().unwrap_or("/")
    }
}
