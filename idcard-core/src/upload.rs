//! Direct-to-storage upload coordination
//!
//! Moves file bytes from the client to object storage without the
//! backend ever seeing them: request a signed upload target, write the
//! bytes straight to storage, then hand the public URL to the caller.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Body of the upload-authorization request
///
/// `fileName`/`fileType` default to empty on the way in so the backend
/// can answer their absence with its own error, not a decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,

    /// When supplied, the backend namespaces the destination key by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A signed upload target paired with its eventual read location
///
/// `upload_url` is write-only, time-limited and content-type-pinned;
/// `public_url` is where the object becomes readable afterwards. Both
/// reference the same destination key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAuthorization {
    pub upload_url: String,
    pub public_url: String,
}

/// Where an upload attempt currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    AuthorizationRequested,
    AuthorizationGranted,
    Uploading,
    Uploaded(String),
    Failed,
}

impl Default for UploadPhase {
    fn default() -> Self {
        UploadPhase::Idle
    }
}

/// Transport for the two network calls an upload needs
pub trait UploadTransport {
    /// Ask the backend to mint a signed upload target
    fn request_authorization(&self, request: &UploadRequest) -> Result<UploadAuthorization>;

    /// Write the raw bytes directly to the storage provider
    fn put_object(&self, upload_url: &str, content_type: &str, bytes: &[u8]) -> Result<()>;
}

/// Drives one upload attempt through its phases
///
/// A failed attempt never yields a URL. Re-running after a failure is
/// safe: every attempt asks the backend for a fresh authorization, and
/// the backend mints a distinct destination key each time, so retries
/// cannot overwrite a prior partial upload.
#[derive(Debug, Default)]
pub struct UploadCoordinator {
    phase: UploadPhase,
}

impl UploadCoordinator {
    pub fn new() -> Self {
        Self {
            phase: UploadPhase::Idle,
        }
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    /// Run one upload attempt to completion
    ///
    /// Returns the public URL of the stored object, or the first error
    /// encountered. On any error the coordinator lands in `Failed`.
    pub fn run<T: UploadTransport>(
        &mut self,
        transport: &T,
        request: UploadRequest,
        bytes: &[u8],
    ) -> Result<String> {
        self.phase = UploadPhase::AuthorizationRequested;
        let authorization = match transport.request_authorization(&request) {
            Ok(auth) => auth,
            Err(e) => {
                self.phase = UploadPhase::Failed;
                return Err(e);
            }
        };
        self.phase = UploadPhase::AuthorizationGranted;

        self.phase = UploadPhase::Uploading;
        if let Err(e) = transport.put_object(&authorization.upload_url, &request.file_type, bytes) {
            self.phase = UploadPhase::Failed;
            return Err(e);
        }

        self.phase = UploadPhase::Uploaded(authorization.public_url.clone());
        Ok(authorization.public_url)
    }
}
