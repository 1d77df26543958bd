//! ID-Card Request Pipeline
//!
//! Implements the client half of the ID-card request flow:
//! - validate a candidate passport photo before any network call
//! - obtain a signed upload target and push the bytes straight to storage
//! - hold the draft request and submit it once the photo link is in place

pub mod draft;
pub mod error;
pub mod form;
pub mod http;
pub mod image;
pub mod upload;

pub use draft::{RequestDraft, Role};
pub use error::Error;
pub use form::{FormPhase, RequestForm, SubmissionTransport, SubmittedRecord};
pub use http::HttpTransport;
pub use image::{validate_image, ImageInfo};
pub use upload::{
    UploadAuthorization, UploadCoordinator, UploadPhase, UploadRequest, UploadTransport,
};

/// Result type for idcard-core operations
pub type Result<T> = std::result::Result<T, Error>;
