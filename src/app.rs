/*
 * Responsibility
 * - Config → dependencies → Router
 * - Middleware wiring (CORS / HTTP plumbing / static uploads)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StoreBackend};
use crate::repos::{ListingRepo, MemoryListingRepo, PgListingRepo};
use crate::services::auth::build_auth_service;
use crate::services::media::{CloudinaryHost, MediaHost, UnconfiguredMediaHost};
use crate::state::{AppState, RuntimeInfo};
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,marketplace_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr may be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting marketplace API");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("creating {}", config.upload_dir.display()))?;

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let listings: Arc<dyn ListingRepo> = match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;
            Arc::new(
                PgListingRepo::connect(url)
                    .await
                    .context("connecting to postgres")?,
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory listing store; data is lost on restart");
            Arc::new(MemoryListingRepo::new())
        }
    };

    let media: Arc<dyn MediaHost> = match &config.media {
        Some(media) => Arc::new(CloudinaryHost::new(media)?),
        None => {
            tracing::warn!("media host credentials not set; uploads will fail");
            Arc::new(UnconfiguredMediaHost)
        }
    };

    Ok(AppState::new(
        listings,
        build_auth_service(config),
        media,
        RuntimeInfo::new(config.app_env),
    ))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api", api::routes(state.clone()))
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config.request_timeout)
}
