//! ID-card request submission endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use idcard_core::Role;
use serde::{Deserialize, Serialize};

use crate::email::EmailSender;
use crate::error::ServiceError;
use crate::signer::UploadSigner;
use crate::state::AppState;
use crate::store::{IdCardRequest, NewIdCardRequest, RequestStore};

/// Absent fields deserialize to empty strings so presence and
/// emptiness are refused the same way
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub passport_photo_link: String,
}

#[derive(Serialize)]
pub struct CreateRequestResponse {
    pub success: bool,
    pub data: IdCardRequest,
}

/// POST /id-requests
/// Validate and persist one ID-card request
pub async fn create_request<R, G, M>(
    State(state): State<Arc<AppState<R, G, M>>>,
    Json(body): Json<CreateRequestBody>,
) -> Result<Json<CreateRequestResponse>, ServiceError>
where
    R: RequestStore,
    G: UploadSigner,
    M: EmailSender,
{
    if body.first_name.is_empty()
        || body.last_name.is_empty()
        || body.department.is_empty()
        || body.identifier.is_empty()
        || body.role.is_empty()
        || body.passport_photo_link.is_empty()
    {
        return Err(ServiceError::MissingFields);
    }

    let role =
        Role::from_str(&body.role).ok_or_else(|| ServiceError::InvalidRole(body.role.clone()))?;

    if state.reject_duplicate_identifiers && state.store.identifier_exists(&body.identifier)? {
        return Err(ServiceError::DuplicateIdentifier);
    }

    let record = state.store.insert(NewIdCardRequest {
        first_name: body.first_name,
        last_name: body.last_name,
        middle_name: body.middle_name.filter(|m| !m.is_empty()),
        department: body.department,
        identifier: body.identifier,
        role,
        passport_photo_link: body.passport_photo_link,
    })?;

    tracing::debug!(id = record.id, "Stored ID-card request");

    Ok(Json(CreateRequestResponse {
        success: true,
        data: record,
    }))
}
