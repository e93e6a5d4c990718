//! # Request Stamping Middleware
//!
//! Gives every request an ID for log correlation.
//!
//! An `X-Request-ID` set by a reverse proxy is kept when it looks sane;
//! otherwise a UUID v4 is generated. The ID is stored in request extensions
//! (as [`RequestStamp`]) and echoed in the `X-Request-ID` response header.
//!
//! Handlers can read it via `Extension<RequestStamp>`.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::SystemTime;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound request ID that is trusted.
const MAX_INBOUND_ID_LEN: usize = 128;

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
    /// Time the request entered the server
    pub timestamp: SystemTime,
}

impl RequestStamp {
    /// Reuse the inbound ID if acceptable, otherwise generate one.
    fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|id| is_acceptable_id(id))
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            id,
            timestamp: SystemTime::now(),
        }
    }
}

fn is_acceptable_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_INBOUND_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Request stamping middleware.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::from_headers(req.headers());

    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{send, test_app};
    use axum::body::Body;

    fn health_with_id(id: &str) -> Request<Body> {
        Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, id)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_inbound_request_id_is_kept() {
        let app = test_app().await;

        let response = send(&app.router, health_with_id("lb-7f3a.42")).await;

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "lb-7f3a.42");
    }

    #[tokio::test]
    async fn test_suspicious_request_id_is_replaced() {
        let app = test_app().await;

        let response = send(&app.router, health_with_id("a b\"c")).await;

        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert_ne!(id, "a b\"c");
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_is_acceptable_id() {
        assert!(is_acceptable_id("abc-123_x.y"));
        assert!(!is_acceptable_id(""));
        assert!(!is_acceptable_id(&"a".repeat(MAX_INBOUND_ID_LEN + 1)));
        assert!(!is_acceptable_id("has space"));
    }
}
