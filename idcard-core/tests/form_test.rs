//! Request form lifecycle tests
//!
//! The form owns one draft at a time and drives validate → upload →
//! submit. A failed submission must preserve the draft (photo link
//! included); only a confirmed insert clears it.

use std::cell::RefCell;

use chrono::Utc;
use idcard_core::{
    Error, FormPhase, RequestDraft, RequestForm, Role, SubmissionTransport, SubmittedRecord,
    UploadAuthorization, UploadPhase, UploadRequest, UploadTransport,
};

// =============================================================================
// Test fixtures
// =============================================================================

/// Minimal valid PNG header, 800x800
fn photo_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&800u32.to_be_bytes());
    bytes.extend_from_slice(&800u32.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes.extend_from_slice(&[0; 4]);
    bytes
}

#[derive(Default)]
struct MockUploadTransport {
    fail_put: bool,
    authorization_calls: RefCell<u32>,
    requests: RefCell<Vec<UploadRequest>>,
}

impl UploadTransport for MockUploadTransport {
    fn request_authorization(&self, request: &UploadRequest) -> idcard_core::Result<UploadAuthorization> {
        *self.authorization_calls.borrow_mut() += 1;
        self.requests.borrow_mut().push(request.clone());
        Ok(UploadAuthorization {
            upload_url: "https://storage.test/photos/uploads/key?signature=abc".to_string(),
            public_url: "https://public.test/photos/uploads/key".to_string(),
        })
    }

    fn put_object(&self, _upload_url: &str, _content_type: &str, _bytes: &[u8]) -> idcard_core::Result<()> {
        if self.fail_put {
            return Err(Error::TransportFailure("connection reset".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
struct MockSubmissionTransport {
    fail: bool,
    submissions: RefCell<Vec<RequestDraft>>,
}

impl SubmissionTransport for MockSubmissionTransport {
    fn submit(&self, draft: &RequestDraft) -> idcard_core::Result<SubmittedRecord> {
        self.submissions.borrow_mut().push(draft.clone());
        if self.fail {
            return Err(Error::TransportFailure("connection reset".to_string()));
        }
        Ok(SubmittedRecord {
            id: self.submissions.borrow().len() as i64,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            middle_name: draft.middle_name.clone(),
            department: draft.department.clone(),
            identifier: draft.identifier.clone(),
            role: draft.role.unwrap(),
            passport_photo_link: draft.passport_photo_link.clone().unwrap(),
            created_at: Utc::now(),
        })
    }
}

fn fill_identity(form: &mut RequestForm) {
    let draft = form.draft_mut();
    draft.first_name = "Ada".to_string();
    draft.last_name = "Lovelace".to_string();
    draft.department = "CS".to_string();
    draft.identifier = "STF-001".to_string();
    draft.role = Some(Role::Staff);
}

// =============================================================================
// Photo attachment
// =============================================================================

#[test]
fn test_rejected_photo_never_touches_transport() {
    let uploads = MockUploadTransport::default();
    let mut form = RequestForm::new();

    let result = form.attach_photo(&uploads, "tiny.png", "image/png", &[0x89, b'P']);

    assert!(matches!(result, Err(Error::UnreadableImage(_))));
    assert_eq!(*uploads.authorization_calls.borrow(), 0);
    assert!(form.draft().passport_photo_link.is_none());
}

#[test]
fn test_unsupported_type_resolved_locally() {
    let uploads = MockUploadTransport::default();
    let mut form = RequestForm::new();

    let result = form.attach_photo(&uploads, "photo.bmp", "image/bmp", &photo_bytes());

    assert!(matches!(result, Err(Error::UnsupportedType { .. })));
    assert_eq!(*uploads.authorization_calls.borrow(), 0);
}

#[test]
fn test_successful_upload_stores_public_url() {
    let uploads = MockUploadTransport::default();
    let mut form = RequestForm::new();

    form.attach_photo(&uploads, "photo.png", "image/png", &photo_bytes())
        .unwrap();

    assert_eq!(
        form.draft().passport_photo_link.as_deref(),
        Some("https://public.test/photos/uploads/key")
    );
    assert_eq!(form.phase(), FormPhase::Editing);
    assert!(matches!(form.upload_phase(), UploadPhase::Uploaded(_)));
}

#[test]
fn test_identity_fields_forwarded_when_present() {
    let uploads = MockUploadTransport::default();
    let mut form = RequestForm::new();
    fill_identity(&mut form);

    form.attach_photo(&uploads, "photo.png", "image/png", &photo_bytes())
        .unwrap();

    let requests = uploads.requests.borrow();
    assert_eq!(requests[0].first_name.as_deref(), Some("Ada"));
    assert_eq!(requests[0].last_name.as_deref(), Some("Lovelace"));
}

#[test]
fn test_failed_upload_clears_photo_link() {
    let good = MockUploadTransport::default();
    let mut form = RequestForm::new();

    form.attach_photo(&good, "photo.png", "image/png", &photo_bytes())
        .unwrap();
    assert!(form.draft().passport_photo_link.is_some());

    // A later attempt that dies mid-transfer must not leave the old
    // link behind pointing at an unconfirmed object
    let bad = MockUploadTransport {
        fail_put: true,
        ..Default::default()
    };
    let result = form.attach_photo(&bad, "photo2.png", "image/png", &photo_bytes());

    assert!(matches!(result, Err(Error::TransportFailure(_))));
    assert!(form.draft().passport_photo_link.is_none());
    assert_eq!(*form.upload_phase(), UploadPhase::Failed);
}

// =============================================================================
// Submission
// =============================================================================

#[test]
fn test_submit_refused_with_missing_fields() {
    let submissions = MockSubmissionTransport::default();
    let mut form = RequestForm::new();

    let result = form.submit(&submissions);

    match result {
        Err(Error::MissingFields { fields }) => {
            assert!(fields.contains(&"firstName"));
            assert!(fields.contains(&"passportPhotoLink"));
        }
        other => panic!("expected MissingFields, got {:?}", other),
    }
    assert!(submissions.submissions.borrow().is_empty());
}

#[test]
fn test_submit_refused_without_photo() {
    let submissions = MockSubmissionTransport::default();
    let mut form = RequestForm::new();
    fill_identity(&mut form);

    let result = form.submit(&submissions);

    match result {
        Err(Error::MissingFields { fields }) => {
            assert_eq!(fields, vec!["passportPhotoLink"]);
        }
        other => panic!("expected MissingFields, got {:?}", other),
    }
}

#[test]
fn test_confirmed_submission_clears_draft() {
    let uploads = MockUploadTransport::default();
    let submissions = MockSubmissionTransport::default();
    let mut form = RequestForm::new();
    fill_identity(&mut form);
    form.attach_photo(&uploads, "photo.png", "image/png", &photo_bytes())
        .unwrap();

    let record = form.submit(&submissions).unwrap();

    assert_eq!(record.first_name, "Ada");
    assert_eq!(record.role, Role::Staff);
    assert!(form.draft().first_name.is_empty());
    assert!(form.draft().passport_photo_link.is_none());
    assert_eq!(form.phase(), FormPhase::Editing);
}

#[test]
fn test_failed_submission_preserves_draft() {
    let uploads = MockUploadTransport::default();
    let mut form = RequestForm::new();
    fill_identity(&mut form);
    form.attach_photo(&uploads, "photo.png", "image/png", &photo_bytes())
        .unwrap();

    let failing = MockSubmissionTransport {
        fail: true,
        ..Default::default()
    };
    let result = form.submit(&failing);

    assert!(matches!(result, Err(Error::TransportFailure(_))));
    // Draft intact, photo link included: the user retries without a
    // second upload
    assert_eq!(form.draft().first_name, "Ada");
    assert!(form.draft().passport_photo_link.is_some());

    let working = MockSubmissionTransport::default();
    form.submit(&working).unwrap();
    assert_eq!(*uploads.authorization_calls.borrow(), 1);
    assert!(form.draft().first_name.is_empty());
}
