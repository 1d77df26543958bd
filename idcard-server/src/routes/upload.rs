//! Upload authorization endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use idcard_core::image;
use idcard_core::{UploadAuthorization, UploadRequest};
use rand::Rng;

use crate::email::EmailSender;
use crate::error::ServiceError;
use crate::signer::UploadSigner;
use crate::state::AppState;
use crate::store::RequestStore;

/// POST /upload-authorization
/// Mint a time-limited signed upload target for a passport photo
pub async fn authorize_upload<R, G, M>(
    State(state): State<Arc<AppState<R, G, M>>>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<UploadAuthorization>, ServiceError>
where
    R: RequestStore,
    G: UploadSigner,
    M: EmailSender,
{
    if req.file_name.trim().is_empty() || req.file_type.trim().is_empty() {
        return Err(ServiceError::MissingUploadFields);
    }

    // The bytes go straight to storage, so the declared type is the only
    // thing checkable here; the signature pins it for the provider.
    if !image::is_allowed_content_type(&req.file_type) {
        return Err(ServiceError::UnsupportedFileType(req.file_type.clone()));
    }

    let key = destination_key(&req);
    let signed = state.signer.sign(&key, &req.file_type)?;

    Ok(Json(UploadAuthorization {
        upload_url: signed.upload_url,
        public_url: signed.public_url,
    }))
}

/// Compose the destination key for one upload attempt
///
/// `uploads/{stem}_{timestamp}_{suffix}.{ext}`. The stem is the
/// requester's sanitized name when both parts were supplied, else the
/// sanitized file-name stem. The random suffix keeps a retried attempt
/// off the key of a failed one.
fn destination_key(req: &UploadRequest) -> String {
    let extension = match req.file_type.split('/').nth(1) {
        Some("jpeg") => "jpg",
        Some(subtype) => subtype,
        None => "bin",
    };

    let first = req.first_name.as_deref().map(sanitize).unwrap_or_default();
    let last = req.last_name.as_deref().map(sanitize).unwrap_or_default();
    let stem = if !first.is_empty() && !last.is_empty() {
        format!("{}_{}", first, last)
    } else {
        let file_stem = req
            .file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&req.file_name);
        let sanitized = sanitize(file_stem);
        if sanitized.is_empty() {
            "photo".to_string()
        } else {
            sanitized
        }
    };

    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix: u32 = rand::thread_rng().gen_range(0..0x100_0000);

    format!("uploads/{}_{}_{:06x}.{}", stem, timestamp, suffix, extension)
}

fn sanitize(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
