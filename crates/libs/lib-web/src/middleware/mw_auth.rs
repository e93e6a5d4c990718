//! # Authentication Middleware
//!
//! Axum middleware that resolves the signed-in user from the cookie session.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{Router, routing::get, middleware::from_fn_with_state};
//! use lib_web::middleware::mw_auth::require_auth;
//!
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .route_layer(from_fn_with_state(state, require_auth));
//! ```
//!
//! Handlers can then extract the user using `Extension<CurrentUser>`:
//!
//! ```rust,ignore
//! use axum::extract::Extension;
//! use lib_web::middleware::CurrentUser;
//!
//! async fn protected_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> String {
//!     format!("Hello, {}!", user.email)
//! }
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use lib_auth::session;
use lib_core::model::store::{models::User, UserRepository};
use lib_core::{AppError, DbPool};
use tower_sessions::Session;
use tracing::{debug, warn};

use crate::handlers::auth_error;

/// The signed-in user, inserted into request extensions by [`require_auth`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Authentication middleware that requires a signed-in session.
///
/// # Behavior
///
/// - **Session with a known user**: continues with `CurrentUser` in extensions
/// - **No session, or the user no longer exists**: `401 Unauthorized`
pub async fn require_auth(
    State(pool): State<DbPool>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = session::user_id(&session)
        .await
        .map_err(auth_error)?
        .ok_or_else(|| {
            debug!("[AUTH] No signed-in user in session");
            AppError::Unauthorized("Not authenticated".to_string())
        })?;

    let user = match UserRepository::find_by_id(&pool, user_id).await? {
        Some(user) => user,
        None => {
            warn!("[AUTH] Session refers to missing user {}; ending session", user_id);
            session::end(&session).await.map_err(auth_error)?;
            return Err(AppError::Unauthorized("Not authenticated".to_string()));
        }
    };

    debug!("[AUTH] Authenticated user: {} (id: {})", user.email, user.id);

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
