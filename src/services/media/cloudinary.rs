use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use url::Url;

use crate::config::MediaConfig;
use crate::services::media::client::{
    ListQuery, MediaError, MediaHost, MediaPage, MediaResult, MediaUpload, UploadedMedia,
};

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/";

/// Cloudinary-backed media host.
///
/// Uploads use a signed request (SHA-256 over the sorted parameters plus the
/// API secret); listing uses the Admin API with basic auth.
#[derive(Clone)]
pub struct CloudinaryHost {
    client: reqwest::Client,
    upload_url: Url,
    list_url: Url,
    api_key: String,
    api_secret: String,
}

impl std::fmt::Debug for CloudinaryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print credentials
        f.debug_struct("CloudinaryHost")
            .field("upload_url", &self.upload_url.as_str())
            .field("list_url", &self.list_url.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    resources: Vec<Value>,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

impl CloudinaryHost {
    pub fn new(config: &MediaConfig) -> MediaResult<Self> {
        Self::with_api_base(config, DEFAULT_API_BASE)
    }

    pub fn with_api_base(config: &MediaConfig, api_base: &str) -> MediaResult<Self> {
        let base = Url::parse(api_base)?;
        let upload_url = base.join(&format!("v1_1/{}/auto/upload", config.cloud_name))?;
        let list_url = base.join(&format!(
            "v1_1/{}/resources/image/upload",
            config.cloud_name
        ))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            upload_url,
            list_url,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    // `k1=v1&k2=v2<secret>`, keys sorted, hex(sha256)
    fn signature(&self, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn read_error(res: reqwest::Response) -> MediaError {
        let status = res.status().as_u16();
        let message = match res.json::<ErrorEnvelope>().await {
            Ok(env) => env.error.message,
            Err(_) => "no error message".to_string(),
        };
        MediaError::Rejected { status, message }
    }
}

#[async_trait]
impl MediaHost for CloudinaryHost {
    fn backend_name(&self) -> &'static str {
        "cloudinary"
    }

    async fn upload(&self, file: MediaUpload) -> MediaResult<UploadedMedia> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("folder", file.folder.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = self.signature(&signed);

        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.content_type)?;

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("folder", file.folder)
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let res = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::read_error(res).await);
        }

        let body: UploadResponse = res.json().await?;
        tracing::debug!(public_id = %body.public_id, "uploaded media");

        Ok(UploadedMedia {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn list(&self, query: ListQuery) -> MediaResult<MediaPage> {
        let mut params = vec![
            ("type", "upload".to_string()),
            ("prefix", format!("{}/", query.folder)),
            ("max_results", query.max_results.to_string()),
        ];
        if let Some(cursor) = query.next_cursor {
            params.push(("next_cursor", cursor));
        }

        let res = self
            .client
            .get(self.list_url.clone())
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .query(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::read_error(res).await);
        }

        let body: ListResponse = res.json().await?;

        Ok(MediaPage {
            resources: body.resources,
            next_cursor: body.next_cursor,
        })
    }
}
