pub mod listing;

pub use listing::{
    Category, Condition, Listing, ListingPatch, ListingStatus, ListingView, NewListing, Price,
    SellerProjection, SellerStats,
};
