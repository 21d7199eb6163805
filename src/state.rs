/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - listing store, token verifier, media host, runtime info
 * - Cheap to Clone (Arc inside)
 */
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppEnv;
use crate::repos::ListingRepo;
use crate::services::{auth::AuthService, media::MediaHost};

/// Process facts reported by the health endpoint.
#[derive(Clone, Debug)]
pub struct RuntimeInfo {
    pub started_at: Instant,
    pub app_env: AppEnv,
    pub version: &'static str,
}

impl RuntimeInfo {
    pub fn new(app_env: AppEnv) -> Self {
        Self {
            started_at: Instant::now(),
            app_env,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<dyn ListingRepo>,
    pub auth: Arc<AuthService>,
    pub media: Arc<dyn MediaHost>,
    pub runtime: RuntimeInfo,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("listings", &self.listings.backend_name())
            .field("auth", &self.auth)
            .field("media", &self.media.backend_name())
            .field("runtime", &self.runtime)
            .finish()
    }
}

impl AppState {
    pub fn new(
        listings: Arc<dyn ListingRepo>,
        auth: Arc<AuthService>,
        media: Arc<dyn MediaHost>,
        runtime: RuntimeInfo,
    ) -> Self {
        Self {
            listings,
            auth,
            media,
            runtime,
        }
    }
}
