/*
 * Responsibility
 * - Request extractors shared by handlers
 */
pub mod auth_ctx;
pub mod resource_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use resource_id::ListingId;
