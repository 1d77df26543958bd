//! Service error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Missing required fields.")]
    MissingFields,

    #[error("Missing fileName or fileType.")]
    MissingUploadFields,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Unknown role: {0}")]
    InvalidRole(String),

    #[error("A request with this identifier already exists.")]
    DuplicateIdentifier,

    #[error("Missing or invalid Authorization header")]
    Unauthorized,

    #[error("Admin access required")]
    Forbidden,

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::MissingFields => {
                (StatusCode::BAD_REQUEST, "Missing required fields.")
            }
            ServiceError::MissingUploadFields => {
                (StatusCode::BAD_REQUEST, "Missing fileName or fileType.")
            }
            ServiceError::UnsupportedFileType(content_type) => {
                tracing::warn!(content_type = %content_type, "Refused to authorize non-image upload");
                (
                    StatusCode::BAD_REQUEST,
                    "File type must be an image (JPEG, PNG, GIF, or WebP).",
                )
            }
            ServiceError::InvalidRole(role) => {
                tracing::warn!(role = %role, "Rejected unknown role");
                (StatusCode::BAD_REQUEST, "Role must be staff or student.")
            }
            ServiceError::DuplicateIdentifier => (
                StatusCode::CONFLICT,
                "A request with this identifier already exists.",
            ),
            ServiceError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized: Missing or invalid Authorization header",
            ),
            ServiceError::Forbidden => {
                (StatusCode::FORBIDDEN, "Forbidden: Admin access required")
            }
            ServiceError::Mail(msg) => {
                tracing::error!("Mail error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email.")
            }
            ServiceError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save registration.")
            }
            ServiceError::Fetch(msg) => {
                tracing::error!("Fetch error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data")
            }
            ServiceError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "success": false, "error": message });
        (status, axum::Json(body)).into_response()
    }
}
