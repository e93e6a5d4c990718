//! Tests for `/auth/login` and `/auth/callback`.

use super::*;

#[tokio::test]
async fn test_login_redirects_to_provider() {
    let app = test_app().await;

    let response = get(&app.router, "/auth/login", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains(&format!("state={}", FAKE_STATE)));
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_callback_signs_in_and_redirects_to_frontend() {
    let app = test_app().await;
    let pending = start_login(&app).await;

    let response = get(&app.router, &callback_path("alice", FAKE_STATE), Some(&pending)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), FRONTEND_URL);
    let signed_in = session_cookie(&response).expect("session cookie");
    assert_ne!(signed_in, pending, "session id is rotated on sign-in");

    let me = get(&app.router, "/auth/me", Some(&signed_in)).await;
    assert_eq!(me.status(), StatusCode::OK);
    let user: UserInfo = body_json(me).await;
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.name.as_deref(), Some("alice"));
    assert!(user.last_login.is_some());
}

#[tokio::test]
async fn test_repeat_sign_in_reuses_the_user() {
    let app = test_app().await;

    let first: UserInfo = body_json(get(&app.router, "/auth/me", Some(&sign_in(&app, "bob").await)).await).await;
    let second: UserInfo = body_json(get(&app.router, "/auth/me", Some(&sign_in(&app, "bob").await)).await).await;

    assert_eq!(first.id, second.id);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_callback_with_wrong_state() {
    let app = test_app().await;
    let pending = start_login(&app).await;

    let response = get(&app.router, &callback_path("alice", "forged"), Some(&pending)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(detail(response).await, "Invalid OAuth state");
}

#[tokio::test]
async fn test_callback_without_pending_login() {
    let app = test_app().await;

    let response = get(&app.router, &callback_path("alice", FAKE_STATE), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(detail(response).await, "Invalid OAuth state");
}

#[tokio::test]
async fn test_callback_cannot_be_replayed() {
    let app = test_app().await;
    let pending = start_login(&app).await;

    let first = get(&app.router, &callback_path("alice", FAKE_STATE), Some(&pending)).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    // The pre-sign-in session id is gone after rotation.
    let replay = get(&app.router, &callback_path("alice", FAKE_STATE), Some(&pending)).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_failed_attempt_consumes_pending_login() {
    let app = test_app().await;
    let pending = start_login(&app).await;

    let wrong = get(&app.router, &callback_path("alice", "forged"), Some(&pending)).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let retry = get(&app.router, &callback_path("alice", FAKE_STATE), Some(&pending)).await;
    assert_eq!(retry.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_callback_with_provider_error() {
    let app = test_app().await;
    let pending = start_login(&app).await;

    let response = get(
        &app.router,
        &format!("/auth/callback?error=access_denied&state={}", FAKE_STATE),
        Some(&pending),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(detail(response).await.contains("access_denied"));
}

#[tokio::test]
async fn test_callback_without_code() {
    let app = test_app().await;
    let pending = start_login(&app).await;

    let response = get(
        &app.router,
        &format!("/auth/callback?state={}", FAKE_STATE),
        Some(&pending),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(detail(response).await, "Missing authorization code");
}

#[tokio::test]
async fn test_callback_with_rejected_code() {
    let app = test_app().await;
    let pending = start_login(&app).await;

    let response = get(&app.router, &callback_path("bad-code", FAKE_STATE), Some(&pending)).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_callback_with_unverified_email() {
    let app = test_app().await;
    let pending = start_login(&app).await;

    let response = get(&app.router, &callback_path("unverified", FAKE_STATE), Some(&pending)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
