//! # CORS Policy
//!
//! A single allowed origin, the frontend, with credentials so the session
//! cookie is sent on cross-origin requests.
//!
//! Browsers refuse `*` together with credentials, so "any method" and "any
//! header" are expressed by mirroring the preflight request.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Build the CORS layer for `frontend_url`.
///
/// Only a request whose `Origin` equals the frontend URL gets an
/// `Access-Control-Allow-Origin` header. With no (or an unusable) frontend URL
/// no cross-origin request is allowed.
pub fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    // Origins never carry a trailing slash.
    let origin = frontend_url.map(|url| url.trim_end_matches('/'));

    match origin.map(|url| (url, HeaderValue::from_str(url))) {
        Some((url, Ok(value))) => {
            info!("[CORS] Allowing origin {}", url);
            cors.allow_origin(AllowOrigin::list([value]))
        }
        Some((url, Err(_))) => {
            warn!("[CORS] FRONTEND_URL is not a valid origin: {}", url);
            cors
        }
        None => cors,
    }
}

#[cfg(test)]
mod tests {
    use super::cors_layer;
    use crate::test_utils::{send, test_app, FRONTEND_URL};
    use axum::{routing::get, Router};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/course")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-custom")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_preflight_from_frontend_is_allowed() {
        let app = test_app().await;

        let response = send(&app.router, preflight(FRONTEND_URL)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], FRONTEND_URL);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "DELETE");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type,x-custom");
    }

    #[tokio::test]
    async fn test_other_origin_is_not_allowed() {
        let app = test_app().await;

        let response = send(&app.router, preflight("https://evil.example")).await;

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_simple_request_from_other_origin_gets_no_allow_origin() {
        let app = test_app().await;

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = send(&app.router, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_trailing_slash_in_frontend_url_is_ignored() {
        let router = Router::new()
            .route("/course", get(|| async { "ok" }))
            .layer(cors_layer(Some("http://localhost:5173/")));

        let response = send(&router, preflight("http://localhost:5173")).await;

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_no_origin_allowed_without_frontend_url() {
        let router = Router::new()
            .route("/course", get(|| async { "ok" }))
            .layer(cors_layer(None));

        for origin in [FRONTEND_URL, "https://evil.example"] {
            let response = send(&router, preflight(origin)).await;
            assert!(response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none());
        }
    }
}
