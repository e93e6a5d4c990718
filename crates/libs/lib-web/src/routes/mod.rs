//! # Route Groups
//!
//! The two routers mounted by [`crate::server::build_router`]:
//!
//! - [`auth_routes`] under `/auth`: Google sign-in, current user, sign-out
//! - [`course_routes`] under `/course`: the signed-in user's courses

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, course};
use crate::middleware::require_auth;
use crate::server::AppState;

/// Authentication routes. Only `/me` requires a session.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/me", get(auth::me).route_layer(from_fn_with_state(state, require_auth)))
        .route("/logout", post(auth::logout))
}

/// Course routes. Every route requires a session.
pub fn course_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(course::list_courses).post(course::create_course))
        .route(
            "/{id}",
            get(course::get_course)
                .put(course::update_course)
                .delete(course::delete_course),
        )
        .route_layer(from_fn_with_state(state, require_auth))
}
