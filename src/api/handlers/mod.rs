pub mod dashboard;
pub mod health;
pub mod listings;
pub mod upload;
