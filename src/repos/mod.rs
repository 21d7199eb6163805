/*
 * Responsibility
 * - Storage seam for listings: the trait plus its implementations
 */
pub mod error;
pub mod listing_repo;
pub mod memory_listing_repo;
pub mod pg_listing_repo;

pub use error::{RepoError, RepoResult};
pub use listing_repo::{ListingRepo, StoreHealth};
pub use memory_listing_repo::MemoryListingRepo;
pub use pg_listing_repo::PgListingRepo;
