/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse (HTTP status + `{ "message": ... }` body)
 * - Conversions from repo / media / extractor errors
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::media::MediaError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No token provided")]
    Unauthenticated,
    #[error("Invalid token")]
    InvalidCredential,
    #[error("Not authorized")]
    Forbidden,
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("{0}")]
    InvalidInput(String),
    #[error("Request body too large")]
    PayloadTooLarge,
    // Upload errors carry the upstream detail in the `error` field.
    #[error("{message}: {detail}")]
    Upload {
        status: StatusCode,
        message: &'static str,
        detail: String,
    },
    #[error("Server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredential | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upload { status, .. } => *status,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Upload {
                message, detail, ..
            } => ErrorResponse {
                message: message.to_string(),
                error: Some(detail),
            },
            other => ErrorResponse {
                message: other.to_string(),
                error: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        // The detail stays in the server log; clients only see "Server error".
        tracing::error!(error = %e, "listing store failure");
        AppError::Internal
    }
}

impl From<MediaError> for AppError {
    fn from(e: MediaError) -> Self {
        tracing::error!(error = %e, "media host failure");
        AppError::Upload {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Upload failed",
            detail: e.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        tracing::debug!(error = %e, "rejected request body");
        AppError::InvalidInput(e.body_text())
    }
}
