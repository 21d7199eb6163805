/*
 * Responsibility
 * - POST /api/upload: accept one `image` field and pass it to the media host
 * - GET /api/upload/list: page through what the media host has stored
 */
use axum::{
    Json,
    extract::{Multipart, Query, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::dto::upload::{
        DEFAULT_FOLDER, ListUploadsFailure, ListUploadsQuery, ListUploadsResponse, UploadResponse,
    },
    error::AppError,
    services::media::{ListQuery, MediaUpload},
    state::AppState,
};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

// Where upload_image is mounted.
pub const UPLOAD_PATH: &str = "/api/upload";

const FIELD_NAME: &str = "image";

struct ImageFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

pub fn too_large() -> AppError {
    AppError::invalid_input("File too large")
}

async fn read_image(mut multipart: Multipart) -> Result<Option<ImageFile>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large()
        } else {
            AppError::invalid_input(e.body_text())
        }
    })? {
        if field.name() != Some(FIELD_NAME) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::invalid_input("Only images allowed"));
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                too_large()
            } else {
                AppError::invalid_input(e.body_text())
            }
        })?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(too_large());
        }

        return Ok(Some(ImageFile {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let no_file = || AppError::invalid_input("No file uploaded");

    // A request that is not multipart at all simply carries no file.
    let multipart = multipart.map_err(|_| no_file())?;
    let file = read_image(multipart).await?.ok_or_else(no_file)?;

    tracing::info!(
        filename = %file.filename,
        size = file.bytes.len(),
        backend = state.media.backend_name(),
        "uploading image"
    );

    let uploaded = state
        .media
        .upload(MediaUpload {
            filename: file.filename.clone(),
            content_type: file.content_type,
            bytes: file.bytes,
            folder: DEFAULT_FOLDER.to_string(),
        })
        .await?;

    Ok(Json(UploadResponse {
        success: true,
        filename: file.filename,
        url: uploaded.url,
        public_id: uploaded.public_id,
    }))
}

pub async fn list_uploads(
    State(state): State<AppState>,
    Query(query): Query<ListUploadsQuery>,
) -> Response {
    let request = ListQuery {
        folder: query.folder().to_string(),
        max_results: query.max_results(),
        next_cursor: query.next_cursor(),
    };

    match state.media.list(request).await {
        Ok(page) => Json(ListUploadsResponse {
            success: true,
            resources: page.resources,
            next_cursor: page.next_cursor,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "listing uploads failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ListUploadsFailure {
                    success: false,
                    message: "Could not list uploads",
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
