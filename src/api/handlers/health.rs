/*
 * Responsibility
 * - GET /api/health (process + store status, no auth)
 * - GET /api/test (plain liveness probe)
 */
use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};

use crate::api::dto::system::{HealthResponse, MessageResponse};
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.listings.health().await;

    Json(HealthResponse {
        status: "ok",
        uptime_seconds: state.runtime.uptime_seconds(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: state.runtime.version,
        env: state.runtime.app_env.as_str(),
        database: database.as_str(),
    })
}

pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Backend running",
    })
}
