/*
 * Responsibility
 * - /listings CRUD handlers
 * - Reads are public; writes need AuthCtx (inserted by the access middleware)
 * - update/delete run the ownership guard on the freshly loaded listing
 *   before touching the body or the store
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::{
        dto::{
            listings::{CreateListingRequest, ListingResponse, UpdateListingRequest},
            system::MessageResponse,
        },
        extractors::{AuthCtxExtractor, ListingId},
    },
    domain::ListingView,
    error::AppError,
    policy::ensure_owner,
    state::AppState,
};

fn to_responses(views: Vec<ListingView>) -> Vec<ListingResponse> {
    views.into_iter().map(ListingResponse::from).collect()
}

pub async fn list_listings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListingResponse>>, AppError> {
    let views = state.listings.list().await?;
    Ok(Json(to_responses(views)))
}

pub async fn get_listing(
    State(state): State<AppState>,
    listing_id: ListingId,
) -> Result<Json<ListingResponse>, AppError> {
    let view = state
        .listings
        .get(listing_id.id)
        .await?
        .ok_or(AppError::not_found("Listing"))?;

    Ok(Json(view.into()))
}

pub async fn list_my_listings(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<Vec<ListingResponse>>, AppError> {
    let views = state.listings.list_by_seller(ctx.user_id).await?;
    Ok(Json(to_responses(views)))
}

pub async fn create_listing(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Result<Json<CreateListingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ListingResponse>), AppError> {
    let Json(req) = payload?;

    // Owner always comes from the verified identity, never from the body.
    let new = req
        .into_new_listing(ctx.user_id)
        .map_err(AppError::invalid_input)?;

    let view = state.listings.create(new).await?;
    tracing::info!(
        listing_id = %view.listing.id,
        seller_id = %ctx.user_id,
        "listing created"
    );

    Ok((StatusCode::CREATED, Json(view.into())))
}

pub async fn update_listing(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    listing_id: ListingId,
    payload: Result<Json<UpdateListingRequest>, JsonRejection>,
) -> Result<Json<ListingResponse>, AppError> {
    let found = state.listings.get(listing_id.id).await?;
    let mut listing = ensure_owner(found, &ctx)?.listing;

    let Json(req) = payload?;
    let patch = req.into_patch().map_err(AppError::invalid_input)?;
    listing.apply(patch);

    // None here means the listing was deleted between load and write.
    let view = state
        .listings
        .update(&listing)
        .await?
        .ok_or(AppError::not_found("Listing"))?;
    tracing::info!(listing_id = %listing.id, "listing updated");

    Ok(Json(view.into()))
}

pub async fn delete_listing(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    listing_id: ListingId,
) -> Result<Json<MessageResponse>, AppError> {
    let found = state.listings.get(listing_id.id).await?;
    ensure_owner(found, &ctx)?;

    if !state.listings.delete(listing_id.id).await? {
        return Err(AppError::not_found("Listing"));
    }
    tracing::info!(listing_id = %listing_id.id, "listing deleted");

    Ok(Json(MessageResponse {
        message: "Listing deleted",
    }))
}
