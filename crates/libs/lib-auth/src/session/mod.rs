//! # Session Helpers
//!
//! Typed access to the values this application keeps in a cookie session.
//!
//! Session data lives server-side in a `tower-sessions` store; the browser only
//! holds a signed session id. Two values are used:
//!
//! - [`PENDING_LOGIN_KEY`]: the CSRF state and PKCE verifier of a sign-in in
//!   progress. Consumed exactly once by the OAuth callback.
//! - [`USER_ID_KEY`]: the id of the signed-in user.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use tower_sessions::{cookie::Key, Session};
use tracing::warn;

use crate::error::Result;
use crate::google::LoginRedirect;

pub const USER_ID_KEY: &str = "user_id";
pub const PENDING_LOGIN_KEY: &str = "pending_login";

/// A sign-in attempt waiting for the provider callback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingLogin {
    pub csrf_state: String,
    pub pkce_verifier: Option<String>,
}

impl From<&LoginRedirect> for PendingLogin {
    fn from(redirect: &LoginRedirect) -> Self {
        Self {
            csrf_state: redirect.csrf_state.clone(),
            pkce_verifier: redirect.pkce_verifier.clone(),
        }
    }
}

/// Derive the cookie signing key from `SECRET_KEY`.
///
/// Without a secret a random key is generated, so sessions do not survive a
/// restart.
pub fn signing_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => {
            warn!("[SESSION] No SECRET_KEY; using a random session signing key");
            Key::generate()
        }
    }
}

/// Remember a sign-in attempt, replacing any earlier one.
pub async fn begin_login(session: &Session, pending: &PendingLogin) -> Result<()> {
    session.insert(PENDING_LOGIN_KEY, pending).await?;
    Ok(())
}

/// Remove and return the pending sign-in attempt, if any.
///
/// The removal is written to the store immediately, whatever the outcome of
/// the request that consumed it.
pub async fn take_pending_login(session: &Session) -> Result<Option<PendingLogin>> {
    let pending = session.remove::<PendingLogin>(PENDING_LOGIN_KEY).await?;

    if pending.is_some() {
        if session.is_empty().await {
            session.flush().await?;
        } else {
            session.save().await?;
        }
    }

    Ok(pending)
}

/// Mark the session as signed in as `user_id`.
///
/// The session id is rotated first so an id planted before sign-in is useless
/// afterwards.
pub async fn establish(session: &Session, user_id: i64) -> Result<()> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// The signed-in user id, if any.
pub async fn user_id(session: &Session) -> Result<Option<i64>> {
    Ok(session.get::<i64>(USER_ID_KEY).await?)
}

/// Sign out: drop all session data and the cookie.
pub async fn end(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}
