//! Listing store interface.
//!
//! Handlers only ever see `Arc<dyn ListingRepo>` through `AppState`, so the
//! HTTP layer can be exercised against `MemoryListingRepo` without a database.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Listing, ListingView, NewListing, SellerStats};
use crate::repos::error::RepoResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreHealth {
    Connected,
    Disconnected,
}

impl StoreHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

#[async_trait]
pub trait ListingRepo: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn health(&self) -> StoreHealth;

    // All listings, newest first.
    async fn list(&self) -> RepoResult<Vec<ListingView>>;

    // Listings owned by `seller_id`, newest first.
    async fn list_by_seller(&self, seller_id: Uuid) -> RepoResult<Vec<ListingView>>;

    async fn get(&self, id: Uuid) -> RepoResult<Option<ListingView>>;

    // Assigns id and timestamps.
    async fn create(&self, new: NewListing) -> RepoResult<ListingView>;

    // Write the mutable fields of `listing` back and refresh `updated_at`.
    // Seller and creation time are never written.
    //
    // Returns `Ok(None)` if the listing vanished in the meantime.
    async fn update(&self, listing: &Listing) -> RepoResult<Option<ListingView>>;

    // Returns whether a listing was removed.
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    async fn seller_stats(&self, seller_id: Uuid) -> RepoResult<SellerStats>;
}
