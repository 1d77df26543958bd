//! HTTP implementations of the pipeline transports

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::draft::RequestDraft;
use crate::form::{SubmissionTransport, SubmittedRecord};
use crate::upload::{UploadAuthorization, UploadRequest, UploadTransport};
use crate::{Error, Result};

/// Error envelope returned by the backend on refusals
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Blocking HTTP transport for both pipeline steps
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport against the given backend base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl UploadTransport for HttpTransport {
    fn request_authorization(&self, request: &UploadRequest) -> Result<UploadAuthorization> {
        let url = format!("{}/upload-authorization", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| Error::TransportFailure(format!("authorization request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let reason = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "authorization refused".to_string());
            return Err(Error::AuthorizationDenied(reason));
        }
        if !status.is_success() {
            return Err(Error::TransportFailure(format!("HTTP error: {}", status)));
        }

        response
            .json()
            .map_err(|e| Error::TransportFailure(format!("Invalid JSON: {}", e)))
    }

    fn put_object(&self, upload_url: &str, content_type: &str, bytes: &[u8]) -> Result<()> {
        let response = self
            .client
            .put(upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .map_err(|e| Error::TransportFailure(format!("upload failed: {}", e)))?;

        let status = response.status();
        // Storage providers reject writes whose authorization window has elapsed
        if status == StatusCode::FORBIDDEN {
            return Err(Error::Expired);
        }
        if !status.is_success() {
            return Err(Error::TransportFailure(format!("HTTP error: {}", status)));
        }

        Ok(())
    }
}

impl SubmissionTransport for HttpTransport {
    fn submit(&self, draft: &RequestDraft) -> Result<SubmittedRecord> {
        let url = format!("{}/id-requests", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .map_err(|e| Error::TransportFailure(format!("submission failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::CONFLICT {
            let reason = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "submission refused".to_string());
            return Err(Error::SubmissionRejected(reason));
        }
        if !status.is_success() {
            return Err(Error::TransportFailure(format!("HTTP error: {}", status)));
        }

        #[derive(Deserialize)]
        struct SubmitEnvelope {
            success: bool,
            data: Option<SubmittedRecord>,
            error: Option<String>,
        }

        let envelope: SubmitEnvelope = response
            .json()
            .map_err(|e| Error::TransportFailure(format!("Invalid JSON: {}", e)))?;

        if !envelope.success {
            return Err(Error::SubmissionRejected(
                envelope.error.unwrap_or_else(|| "submission refused".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| Error::TransportFailure("response missing stored record".to_string()))
    }
}
