//! Shared fixtures for router-level tests.
//!
//! [`test_app`] builds the full router over an in-memory database and a
//! [`FakeProvider`], so the sign-in flow runs without contacting Google.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use lib_auth::{GoogleProfile, LoginRedirect, OAuthProvider};
use lib_core::model::store::schema;
use lib_core::{Config, DbPool};
use serde::de::DeserializeOwned;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

use crate::middleware::{session_layer, session_store};
use crate::server::{build_router, AppState};

pub const FRONTEND_URL: &str = "http://localhost:5173";
pub const FAKE_STATE: &str = "fake-state";

/// Authorization code the fake provider rejects.
pub const BAD_CODE: &str = "bad-code";
/// Authorization code that yields a profile with an unverified email.
pub const UNVERIFIED_CODE: &str = "unverified";

/// Identity provider that derives the profile from the authorization code.
///
/// Code `alice` signs in as Google account `google-alice` with email
/// `alice@example.com`.
pub struct FakeProvider;

#[async_trait]
impl OAuthProvider for FakeProvider {
    fn authorize(&self) -> LoginRedirect {
        LoginRedirect {
            url: format!("https://accounts.example/auth?state={}", FAKE_STATE),
            csrf_state: FAKE_STATE.to_string(),
            pkce_verifier: Some("fake-verifier".to_string()),
        }
    }

    async fn exchange_code(
        &self,
        code: String,
        pkce_verifier: Option<String>,
    ) -> lib_auth::Result<GoogleProfile> {
        assert_eq!(pkce_verifier.as_deref(), Some("fake-verifier"));

        if code == BAD_CODE {
            return Err(lib_auth::Error::TokenExchange("invalid_grant".to_string()));
        }

        Ok(GoogleProfile {
            sub: format!("google-{}", code),
            email: format!("{}@example.com", code),
            email_verified: Some(code != UNVERIFIED_CODE),
            name: Some(code.clone()),
            picture: None,
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
}

pub fn test_config() -> Config {
    Config::from_lookup(|name| match name {
        "GOOGLE_CLIENT_ID" => Some("test-client-id".to_string()),
        "GOOGLE_CLIENT_SECRET" => Some("test-client-secret".to_string()),
        "FRONTEND_URL" => Some(FRONTEND_URL.to_string()),
        "SECRET_KEY" => Some("test-secret-key".to_string()),
        _ => None,
    })
}

/// In-memory database with all tables. A single connection keeps every
/// query on the same database.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    schema::create_all(&pool)
        .await
        .expect("Failed to create tables");

    pool
}

pub async fn test_app() -> TestApp {
    let pool = setup_test_db().await;
    let config = test_config();
    let provider: Arc<dyn OAuthProvider> = Arc::new(FakeProvider);

    let store = session_store(pool.clone())
        .await
        .expect("Failed to create session table");
    let sessions = session_layer(store, config.secret_key.as_deref());
    let router = build_router(AppState::new(pool.clone(), config, Some(provider)), sessions);

    TestApp { router, pool }
}

// region: --- Requests
pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

fn request(method: Method, path: &str, cookie: Option<&str>, body: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(router: &Router, path: &str, cookie: Option<&str>) -> Response {
    send(router, request(Method::GET, path, cookie, None)).await
}

pub async fn post(router: &Router, path: &str, cookie: Option<&str>) -> Response {
    send(router, request(Method::POST, path, cookie, None)).await
}

pub async fn delete(router: &Router, path: &str, cookie: Option<&str>) -> Response {
    send(router, request(Method::DELETE, path, cookie, None)).await
}

pub async fn post_json(
    router: &Router,
    path: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(router, request(Method::POST, path, cookie, Some(body.to_string()))).await
}

pub async fn put_json(
    router: &Router,
    path: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(router, request(Method::PUT, path, cookie, Some(body.to_string()))).await
}
// endregion: --- Requests

// region: --- Responses
/// The `session=...` pair from a `Set-Cookie` header, ready to send back.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| value.starts_with("session="))
        .filter_map(|value| value.split(';').next())
        .map(str::to_string)
        .next()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not the expected JSON")
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("response has no Location header")
}
// endregion: --- Responses

// region: --- Sign-in
/// Start a sign-in and return the session cookie holding the pending state.
pub async fn start_login(app: &TestApp) -> String {
    let response = get(&app.router, "/auth/login", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("login should set a session cookie")
}

/// Run the whole sign-in flow for `code` and return the signed-in cookie.
pub async fn sign_in(app: &TestApp, code: &str) -> String {
    let pending = start_login(app).await;

    let response = get(
        &app.router,
        &format!("/auth/callback?code={}&state={}", code, FAKE_STATE),
        Some(&pending),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    session_cookie(&response).expect("callback should set a session cookie")
}
// endregion: --- Sign-in
