//! # Authentication Handlers
//!
//! HTTP request handlers for Google sign-in and the cookie session.
//!
//! ## Overview
//!
//! 1. `GET /auth/login` stores a pending sign-in (CSRF state, PKCE verifier)
//!    in the session and redirects to Google.
//! 2. `GET /auth/callback` consumes the pending sign-in, checks the state,
//!    exchanges the code, upserts the user, and marks the session signed in.
//! 3. `GET /auth/me` and `POST /auth/logout` read and end the session.

use axum::{
    extract::{Extension, Query, State},
    response::Redirect,
    Json,
};
use lib_auth::{session, PendingLogin};
use lib_core::dto::{MessageResponse, UserInfo};
use lib_core::model::store::{models::UserForUpsert, UserRepository};
use lib_core::{AppError, Config, DbPool, Result};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, info, instrument, warn};

use crate::handlers::auth_error;
use crate::middleware::CurrentUser;
use crate::server::SharedOAuth;

const INVALID_STATE: &str = "Invalid OAuth state";

/// Query parameters Google appends to the redirect URL.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user declines consent
    pub error: Option<String>,
}

fn configured(oauth: SharedOAuth) -> Result<std::sync::Arc<dyn lib_auth::OAuthProvider>> {
    oauth.ok_or_else(|| AppError::Config("Google OAuth is not configured".to_string()))
}

/// Login handler - starts a Google sign-in.
#[instrument(skip_all)]
pub async fn login(
    State(oauth): State<SharedOAuth>,
    session: Session,
) -> Result<Redirect> {
    let provider = configured(oauth)?;

    let redirect = provider.authorize();
    session::begin_login(&session, &PendingLogin::from(&redirect))
        .await
        .map_err(auth_error)?;

    info!("[LOGIN] Redirecting to identity provider");
    Ok(Redirect::to(&redirect.url))
}

/// Callback handler - completes a Google sign-in.
///
/// # Returns
///
/// * `303 See Other` to `FRONTEND_URL` (or `/`) once signed in
/// * `401` when the user declined, or the state does not match a pending sign-in
/// * `400` when the provider sent no code
/// * `502` when the code exchange or profile fetch fails
#[instrument(skip_all)]
pub async fn callback(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(oauth): State<SharedOAuth>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect> {
    let provider = configured(oauth)?;

    // Consumed up front so a pending sign-in can never be replayed.
    let pending = session::take_pending_login(&session)
        .await
        .map_err(auth_error)?;

    if let Some(error) = query.error {
        warn!("[CALLBACK] Provider returned error: {}", error);
        return Err(AppError::Unauthorized(format!("Sign-in was not completed: {}", error)));
    }

    let pending = pending.ok_or_else(|| {
        warn!("[CALLBACK] No pending sign-in in session");
        AppError::Unauthorized(INVALID_STATE.to_string())
    })?;

    if query.state.as_deref() != Some(pending.csrf_state.as_str()) {
        warn!("[CALLBACK] State mismatch");
        return Err(AppError::Unauthorized(INVALID_STATE.to_string()));
    }

    let code = query
        .code
        .ok_or_else(|| AppError::InvalidInput("Missing authorization code".to_string()))?;

    debug!("[CALLBACK] Exchanging authorization code...");
    let profile = provider
        .exchange_code(code, pending.pkce_verifier)
        .await
        .map_err(auth_error)?;

    if profile.email_verified == Some(false) {
        warn!("[CALLBACK] Unverified email for sub {}", profile.sub);
        return Err(AppError::Unauthorized("Google account email is not verified".to_string()));
    }

    let user = UserRepository::upsert_google(
        &pool,
        UserForUpsert::new(profile.sub, profile.email)
            .name(profile.name)
            .picture(profile.picture),
    )
    .await?;

    session::establish(&session, user.id)
        .await
        .map_err(auth_error)?;

    info!("[CALLBACK] User signed in: {} (id: {})", user.email, user.id);
    Ok(Redirect::to(config.post_login_redirect()))
}

/// Current user handler.
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserInfo> {
    Json(UserInfo::from(user))
}

/// Logout handler - ends the session. Succeeds without a session too.
pub async fn logout(session: Session) -> Result<Json<MessageResponse>> {
    session::end(&session).await.map_err(auth_error)?;

    info!("[LOGOUT] Session ended");
    Ok(Json(MessageResponse::new("Logged out.")))
}

#[cfg(test)]
mod tests;
