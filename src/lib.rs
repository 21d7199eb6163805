//! Marketplace listings API: bearer-token auth, owner-guarded listing CRUD,
//! image upload proxy and health reporting, served with axum.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod policy;
pub mod repos;
pub mod services;
pub mod state;
