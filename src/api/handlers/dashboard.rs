/*
 * Responsibility
 * - GET /api/dashboard/stats: counters over the requester's own listings
 */
use axum::{Json, extract::State};

use crate::{
    api::{dto::dashboard::StatsResponse, extractors::AuthCtxExtractor},
    error::AppError,
    state::AppState,
};

pub async fn dashboard_stats(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.listings.seller_stats(ctx.user_id).await?;
    Ok(Json(stats.into()))
}
