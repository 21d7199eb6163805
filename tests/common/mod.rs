//! Shared harness for HTTP-level tests: the real router over an in-memory
//! store and a scripted media host.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use marketplace_api::app::build_router;
use marketplace_api::config::{AppEnv, Config, StoreBackend};
use marketplace_api::repos::MemoryListingRepo;
use marketplace_api::services::auth::AuthService;
use marketplace_api::services::media::{
    ListQuery, MediaError, MediaHost, MediaPage, MediaResult, MediaUpload, UploadedMedia,
};
use marketplace_api::state::{AppState, RuntimeInfo};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        app_env: AppEnv::Development,
        store_backend: StoreBackend::Memory,
        database_url: None,
        jwt_secret: SECRET.to_string(),
        jwt_leeway_seconds: 0,
        cors_allowed_origins: vec!["http://shop.test".to_string()],
        media: None,
        upload_dir: PathBuf::from("uploads"),
        request_timeout: Duration::from_secs(5),
    }
}

/// Media host double: records uploads, answers listings from a script.
#[derive(Default)]
pub struct FakeMediaHost {
    pub uploads: Mutex<Vec<MediaUpload>>,
    pub fail: bool,
}

#[async_trait]
impl MediaHost for FakeMediaHost {
    fn backend_name(&self) -> &'static str {
        "fake"
    }

    async fn upload(&self, file: MediaUpload) -> MediaResult<UploadedMedia> {
        if self.fail {
            return Err(MediaError::Transport("connection refused".into()));
        }
        let public_id = format!("{}/{}", file.folder, file.filename);
        self.uploads.lock().unwrap().push(file);
        Ok(UploadedMedia {
            url: format!("https://media.test/{public_id}"),
            public_id,
        })
    }

    async fn list(&self, query: ListQuery) -> MediaResult<MediaPage> {
        if self.fail {
            return Err(MediaError::Rejected {
                status: 401,
                message: "bad credentials".into(),
            });
        }
        Ok(MediaPage {
            resources: vec![json!({
                "public_id": format!("{}/a", query.folder),
                "max_results": query.max_results,
            })],
            next_cursor: query.next_cursor.map(|c| format!("{c}-next")),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: MemoryListingRepo,
    pub auth: Arc<AuthService>,
    pub media: Arc<FakeMediaHost>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_media(FakeMediaHost::default())
    }

    pub fn with_media(media: FakeMediaHost) -> Self {
        let config = test_config();
        let repo = MemoryListingRepo::new();
        let auth = Arc::new(AuthService::new(SECRET.as_bytes(), 0));
        let media = Arc::new(media);

        let state = AppState::new(
            Arc::new(repo.clone()),
            auth.clone(),
            media.clone(),
            RuntimeInfo::new(config.app_env),
        );

        Self {
            router: build_router(state, &config),
            repo,
            auth,
            media,
        }
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.auth.issue(user_id, 600).unwrap()
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let body = match body {
            Some(v) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Create a listing as `owner` and return its id.
    pub async fn create_listing(&self, owner: Uuid, body: Value) -> String {
        let token = self.token_for(owner);
        let (status, created) = self
            .json("POST", "/api/listings", Some(body), Some(&token))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{created}");
        created["id"].as_str().unwrap().to_string()
    }
}

pub fn laptop() -> Value {
    json!({
        "title": "Laptop",
        "description": "Used",
        "category": "computers",
        "condition": "good",
        "price": 300
    })
}
