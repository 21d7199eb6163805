//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging (TraceLayer)
//! - Body size limit, sized for the largest accepted upload; an oversized
//!   body still answers with the usual `{ "message": ... }` error shape
//! - Global timeout from `Config`

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::Request;
use axum::http::{StatusCode, header, header::HeaderName};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::upload::{MAX_UPLOAD_BYTES, UPLOAD_PATH, too_large};
use crate::error::AppError;

// Multipart framing on top of the largest accepted image.
pub const MAX_BODY_BYTES: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Turn the body limit's plain-text 413 into an `AppError`.
///
/// Uploads get the same 400 the upload handler gives for an oversized file;
/// every other route gets a JSON 413.
async fn oversized_body(req: Request, next: Next) -> Response {
    let is_upload = req.uri().path() == UPLOAD_PATH;
    let res = next.run(req).await;

    if res.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return res;
    }
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
    if is_json {
        return res;
    }

    tracing::debug!(is_upload, "request body over the transport limit");
    if is_upload {
        too_large().into_response()
    } else {
        AppError::PayloadTooLarge.into_response()
    }
}

pub fn apply(router: Router, timeout: Duration) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let outer = ServiceBuilder::new()
        // TimeoutLayer errors must become responses before reaching axum.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http());

    // Innermost first: the limit rejects, oversized_body rewrites the
    // rejection, then request id / timeout / tracing wrap everything.
    router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn(oversized_body))
        .layer(outer)
}
