//! CORS policy for browser clients.
//!
//! Policy:
//! - `FRONTEND_URL` unset/empty, or containing `*`: every origin is allowed
//!   (the request origin is mirrored back, so credentials keep working).
//! - Otherwise: exact-match allowlist. The opaque `null` origin (file://
//!   pages, sandboxed frames) is always allowed.
//! - Credentials are allowed in both modes.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return AllowOrigin::mirror_request();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
        origin.as_bytes() == b"null" || allowed.iter().any(|v| v == origin)
    })
}

/// Build the CORS layer for the given configuration.
pub fn layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.cors_allowed_origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(60 * 10))
}

/// Apply CORS policy to the given Router.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}
