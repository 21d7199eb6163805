/**
 * Responsibility
 *  - Declare one typed id per resource (tag + alias)
 *  - No parsing logic here; that lives in core
 */
use super::core::{ResourceId, ResourceTag};

// listings
pub enum ListingTag {}

impl ResourceTag for ListingTag {
    const NAME: &'static str = "Listing";
}

pub type ListingId = ResourceId<ListingTag>;
