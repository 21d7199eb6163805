pub mod dashboard;
pub mod listings;
pub mod system;
pub mod upload;
