//! Error types for the ID-card request pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported image type: {content_type}")]
    UnsupportedType { content_type: String },

    #[error("Image size {size} exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("Image is {width}x{height}, minimum is {min_width}x{min_height}")]
    TooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    #[error("Unreadable image: {0}")]
    UnreadableImage(String),

    #[error("Upload authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Upload authorization expired")]
    Expired,

    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("An upload is already in flight")]
    UploadInFlight,

    #[error("Submission rejected: {0}")]
    SubmissionRejected(String),
}
