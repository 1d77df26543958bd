//! Request form orchestration
//!
//! Holds exactly one draft at a time and drives it through the
//! validate → upload → submit pipeline. Every retry is caller-initiated;
//! nothing in here retries on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::{RequestDraft, Role};
use crate::image;
use crate::upload::{UploadCoordinator, UploadPhase, UploadRequest, UploadTransport};
use crate::{Error, Result};

/// The row the backend stored, echoed back on a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub department: String,
    pub identifier: String,
    pub role: Role,
    pub passport_photo_link: String,
    pub created_at: DateTime<Utc>,
}

/// Transport for handing a finished draft to the backend
pub trait SubmissionTransport {
    fn submit(&self, draft: &RequestDraft) -> Result<SubmittedRecord>;
}

/// What the form is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Uploading,
    Submitting,
}

impl Default for FormPhase {
    fn default() -> Self {
        FormPhase::Editing
    }
}

/// One in-flight ID-card request
///
/// The draft survives a failed submission, photo link included, so the
/// user can retry without re-uploading. It is cleared only after the
/// backend confirms the insert.
#[derive(Debug, Default)]
pub struct RequestForm {
    draft: RequestDraft,
    coordinator: UploadCoordinator,
    phase: FormPhase,
}

impl RequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RequestDraft {
        &mut self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn upload_phase(&self) -> &UploadPhase {
        self.coordinator.phase()
    }

    /// Validate a candidate photo and, if it passes, upload it
    ///
    /// A validation reject resolves locally; the transport is never
    /// touched. On upload failure the draft's photo link is cleared so
    /// it can never point at a partial or unconfirmed upload.
    pub fn attach_photo<T: UploadTransport>(
        &mut self,
        transport: &T,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<()> {
        if self.phase == FormPhase::Uploading {
            return Err(Error::UploadInFlight);
        }

        image::validate_image(content_type, bytes)?;

        let request = UploadRequest {
            file_name: file_name.to_string(),
            file_type: content_type.to_string(),
            first_name: non_empty(&self.draft.first_name),
            last_name: non_empty(&self.draft.last_name),
        };

        self.phase = FormPhase::Uploading;
        let result = self.coordinator.run(transport, request, bytes);
        self.phase = FormPhase::Editing;

        match result {
            Ok(public_url) => {
                self.draft.passport_photo_link = Some(public_url);
                Ok(())
            }
            Err(e) => {
                self.draft.passport_photo_link = None;
                Err(e)
            }
        }
    }

    /// Submit the draft to the backend
    ///
    /// Refused while an upload is in flight or while required fields
    /// are missing. Success discards the draft; failure preserves it.
    pub fn submit<T: SubmissionTransport>(&mut self, transport: &T) -> Result<SubmittedRecord> {
        if self.phase == FormPhase::Uploading {
            return Err(Error::UploadInFlight);
        }

        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(Error::MissingFields { fields: missing });
        }

        self.phase = FormPhase::Submitting;
        let result = transport.submit(&self.draft);
        self.phase = FormPhase::Editing;

        if result.is_ok() {
            self.draft.reset();
        }
        result
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
