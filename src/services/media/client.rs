//! Media host interface used by the upload routes.
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

/// Media-host errors (configuration/transport/remote rejection).
///
/// Kept independent from `AppError`; the handler decides the HTTP shape.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media host is not configured")]
    NotConfigured,
    #[error("invalid media host endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("media host transport error: {0}")]
    Transport(String),
    #[error("media host rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected media host response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for MediaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub folder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub folder: String,
    pub max_results: u32,
    pub next_cursor: Option<String>,
}

/// One page of stored assets. Resources are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaPage {
    pub resources: Vec<Value>,
    pub next_cursor: Option<String>,
}

#[async_trait]
pub trait MediaHost: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn upload(&self, file: MediaUpload) -> MediaResult<UploadedMedia>;

    async fn list(&self, query: ListQuery) -> MediaResult<MediaPage>;
}

/// Stand-in when no media credentials are configured: every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredMediaHost;

#[async_trait]
impl MediaHost for UnconfiguredMediaHost {
    fn backend_name(&self) -> &'static str {
        "unconfigured"
    }

    async fn upload(&self, _file: MediaUpload) -> MediaResult<UploadedMedia> {
        Err(MediaError::NotConfigured)
    }

    async fn list(&self, _query: ListQuery) -> MediaResult<MediaPage> {
        Err(MediaError::NotConfigured)
    }
}
