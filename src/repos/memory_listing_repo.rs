//! In-process `ListingRepo`.
//!
//! Used by the HTTP tests and by `STORE_BACKEND=memory` for local runs.
//! The lock is never held across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    Listing, ListingStatus, ListingView, NewListing, SellerProjection, SellerStats,
};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::listing_repo::{ListingRepo, StoreHealth};

#[derive(Debug, Clone)]
struct UserRecord {
    name: String,
    email: String,
}

#[derive(Debug, Default)]
struct Inner {
    // seq breaks created_at ties so "newest first" is stable.
    listings: HashMap<Uuid, (u64, Listing)>,
    users: HashMap<Uuid, UserRecord>,
    next_seq: u64,
}

impl Inner {
    fn view(&self, listing: &Listing) -> ListingView {
        let seller = match self.users.get(&listing.seller_id) {
            Some(user) => SellerProjection {
                id: listing.seller_id,
                name: Some(user.name.clone()),
                email: Some(user.email.clone()),
            },
            None => SellerProjection::unresolved(listing.seller_id),
        };

        ListingView {
            listing: listing.clone(),
            seller,
        }
    }

    fn newest_first<F>(&self, keep: F) -> Vec<ListingView>
    where
        F: Fn(&Listing) -> bool,
    {
        let mut hits: Vec<&(u64, Listing)> =
            self.listings.values().filter(|(_, l)| keep(l)).collect();
        hits.sort_by(|(sa, a), (sb, b)| b.created_at.cmp(&a.created_at).then(sb.cmp(sa)));
        hits.into_iter().map(|(_, l)| self.view(l)).collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryListingRepo {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryListingRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a seller so listing responses carry a resolved projection.
    pub fn upsert_user(
        &self,
        id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> RepoResult<()> {
        let mut inner = self.inner.write().map_err(|_| RepoError::Poisoned)?;
        inner.users.insert(
            id,
            UserRecord {
                name: name.into(),
                email: email.into(),
            },
        );
        Ok(())
    }

    pub fn len(&self) -> RepoResult<usize> {
        let inner = self.inner.read().map_err(|_| RepoError::Poisoned)?;
        Ok(inner.listings.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ListingRepo for MemoryListingRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health(&self) -> StoreHealth {
        match self.inner.read() {
            Ok(_) => StoreHealth::Connected,
            Err(_) => StoreHealth::Disconnected,
        }
    }

    async fn list(&self) -> RepoResult<Vec<ListingView>> {
        let inner = self.inner.read().map_err(|_| RepoError::Poisoned)?;
        Ok(inner.newest_first(|_| true))
    }

    async fn list_by_seller(&self, seller_id: Uuid) -> RepoResult<Vec<ListingView>> {
        let inner = self.inner.read().map_err(|_| RepoError::Poisoned)?;
        Ok(inner.newest_first(|l| l.seller_id == seller_id))
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<ListingView>> {
        let inner = self.inner.read().map_err(|_| RepoError::Poisoned)?;
        Ok(inner.listings.get(&id).map(|(_, l)| inner.view(l)))
    }

    async fn create(&self, new: NewListing) -> RepoResult<ListingView> {
        let mut inner = self.inner.write().map_err(|_| RepoError::Poisoned)?;

        let now = Utc::now();
        let listing = Listing {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            category: new.category,
            condition: new.condition,
            price: new.price,
            images: new.images,
            seller_id: new.seller_id,
            status: new.status,
            created_at: now,
            updated_at: now,
        };

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.listings.insert(listing.id, (seq, listing.clone()));

        Ok(inner.view(&listing))
    }

    async fn update(&self, listing: &Listing) -> RepoResult<Option<ListingView>> {
        let mut inner = self.inner.write().map_err(|_| RepoError::Poisoned)?;

        let Some((_, stored)) = inner.listings.get_mut(&listing.id) else {
            return Ok(None);
        };

        stored.title = listing.title.clone();
        stored.description = listing.description.clone();
        stored.category = listing.category;
        stored.condition = listing.condition;
        stored.price = listing.price;
        stored.images = listing.images.clone();
        stored.status = listing.status;
        stored.updated_at = Utc::now();

        let updated = stored.clone();
        Ok(Some(inner.view(&updated)))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut inner = self.inner.write().map_err(|_| RepoError::Poisoned)?;
        Ok(inner.listings.remove(&id).is_some())
    }

    async fn seller_stats(&self, seller_id: Uuid) -> RepoResult<SellerStats> {
        let inner = self.inner.read().map_err(|_| RepoError::Poisoned)?;

        let stats = inner
            .listings
            .values()
            .map(|(_, l)| l)
            .filter(|l| l.seller_id == seller_id)
            .fold(SellerStats::default(), |mut acc, l| {
                acc.total_listings += 1;
                match l.status {
                    ListingStatus::Available => acc.active_listings += 1,
                    ListingStatus::Sold => acc.sold_listings += 1,
                    ListingStatus::Pending => {}
                }
                acc.total_value += l.price.value();
                acc
            });

        Ok(stats)
    }
}
