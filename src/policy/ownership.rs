//! Ownership guard for listing mutations.

use crate::api::extractors::AuthCtx;
use crate::domain::ListingView;
use crate::error::AppError;

/// Permit a mutation only when the requester owns the listing.
///
/// Existence is checked before ownership, so a missing listing is always a
/// 404 regardless of who asks. Nothing is cached: every request re-runs this.
pub fn ensure_owner(found: Option<ListingView>, ctx: &AuthCtx) -> Result<ListingView, AppError> {
    let view = found.ok_or(AppError::not_found("Listing"))?;

    if !view.listing.is_owned_by(ctx.user_id) {
        tracing::warn!(
            listing_id = %view.listing.id,
            requester = %ctx.user_id,
            "ownership check failed"
        );
        return Err(AppError::Forbidden);
    }

    Ok(view)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        Category, Condition, Listing, ListingStatus, Price, SellerProjection,
    };

    fn view_owned_by(owner: Uuid) -> ListingView {
        let now = Utc::now();
        ListingView {
            listing: Listing {
                id: Uuid::new_v4(),
                title: "Monitor".into(),
                description: "27 inch".into(),
                category: Category::Monitors,
                condition: Condition::LikeNew,
                price: Price::new(120.0).unwrap(),
                images: Vec::new(),
                seller_id: owner,
                status: ListingStatus::Available,
                created_at: now,
                updated_at: now,
            },
            seller: SellerProjection::unresolved(owner),
        }
    }

    #[test]
    fn owner_is_permitted() {
        let owner = Uuid::new_v4();
        let view = view_owned_by(owner);

        let permitted = ensure_owner(Some(view.clone()), &AuthCtx::new(owner)).unwrap();
        assert_eq!(permitted, view);
    }

    #[test]
    fn other_identity_is_forbidden() {
        let view = view_owned_by(Uuid::new_v4());

        let err = ensure_owner(Some(view), &AuthCtx::new(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn missing_listing_is_not_found_before_ownership() {
        let err = ensure_owner(None, &AuthCtx::new(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "Listing" }));
    }
}
