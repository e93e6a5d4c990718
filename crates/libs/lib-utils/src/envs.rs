//! # Environment Variables
//!
//! Utilities for reading environment variables.
//!
//! A variable that is set but empty is treated the same as an unset one.

use std::env;

/// Get an environment variable, or `None` when unset or empty.
pub fn get_env_opt(name: &str) -> Option<String> {
    non_empty(env::var(name).ok())
}

/// Get an environment variable, falling back to `default`.
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Collapse empty and whitespace-only values to `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
