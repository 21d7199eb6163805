//! Bearer token verification → `AuthCtx` in request extensions.
//!
//! - No `Authorization: Bearer <token>` header (or an empty token) → 401
//! - Token present but not verifiable (signature, expiry, claim schema) → 403
//! - On success the handler runs with `AuthCtx` available to `AuthCtxExtractor`

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Require authentication on every route of `router`.
///
/// Uses `route_layer` so unmatched paths still fall through to 404 instead
/// of answering 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // plain from_fn cannot extract State; hand it over explicitly
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// Header names are case-insensitive at the HTTP layer already.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    auth.strip_prefix("Bearer ")
        .and_then(|rest| rest.split(' ').next())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthenticated)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;

    let verified = match state.auth.verify_verified(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "access token verification failed"
            );
            return Err(AppError::InvalidCredential);
        }
    };

    let auth_ctx = AuthCtx {
        user_id: verified.user_id,
        issued_at: verified.issued_at,
    };
    tracing::debug!(user_id = %auth_ctx.user_id, "authenticated request");

    // middleware → extractor
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
