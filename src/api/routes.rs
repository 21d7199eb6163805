/*
 * Responsibility
 * - URL structure under /api
 * - Which routes need a bearer token: the protected router gets the access
 *   middleware via route_layer, then both routers are merged (same path with
 *   different methods is fine, e.g. GET vs PUT /listings/{id})
 */
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::api::handlers::{
    dashboard::dashboard_stats,
    health::{health, ping},
    listings::{
        create_listing, delete_listing, get_listing, list_listings, list_my_listings,
        update_listing,
    },
    upload::{list_uploads, upload_image},
};
use crate::middleware::{auth::access, http::MAX_BODY_BYTES};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/test", get(ping))
        .route("/listings", get(list_listings))
        .route("/listings/{id}", get(get_listing))
        .route(
            "/upload",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .route("/upload/list", get(list_uploads));

    let protected = Router::new()
        .route("/listings", post(create_listing))
        .route("/listings/user/me", get(list_my_listings))
        .route("/listings/{id}", put(update_listing).delete(delete_listing))
        .route("/dashboard/stats", get(dashboard_stats));

    public.merge(access::apply(protected, state))
}
