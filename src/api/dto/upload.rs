/*
 * Responsibility
 * - Upload request/response DTOs (the wire shape of /api/upload)
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_FOLDER: &str = "e-cycle-uploads";
pub const DEFAULT_MAX_RESULTS: u32 = 50;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListUploadsQuery {
    pub folder: Option<String>,
    // Kept as text: anything unparsable falls back to the default.
    pub max_results: Option<String>,
    pub next_cursor: Option<String>,
}

impl ListUploadsQuery {
    pub fn folder(&self) -> &str {
        self.folder
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FOLDER)
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
            .as_deref()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS)
    }

    pub fn next_cursor(&self) -> Option<String> {
        self.next_cursor.clone().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct ListUploadsResponse {
    pub success: bool,
    pub resources: Vec<Value>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListUploadsFailure {
    pub success: bool,
    pub message: &'static str,
    pub error: String,
}
