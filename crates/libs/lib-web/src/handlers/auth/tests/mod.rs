//! # Auth Handler Tests
//!
//! Test suite for the sign-in flow and the session endpoints.

mod login;

use crate::test_utils::{
    body_json, get, location, post, session_cookie, sign_in, start_login, test_app, FAKE_STATE,
    FRONTEND_URL,
};
use axum::http::StatusCode;
use lib_core::dto::{MessageResponse, UserInfo};
use serde_json::Value;

fn callback_path(code: &str, state: &str) -> String {
    format!("/auth/callback?code={}&state={}", code, state)
}

async fn detail(response: axum::response::Response) -> String {
    let body: Value = body_json(response).await;
    body["detail"].as_str().unwrap_or_default().to_string()
}
