//! Admin read path
//!
//! Identity verification is delegated to an external provider; this
//! endpoint only checks that the presented bearer credential matches
//! the configured one.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::email::EmailSender;
use crate::error::ServiceError;
use crate::signer::UploadSigner;
use crate::state::AppState;
use crate::store::{IdCardRequest, RequestStore};

#[derive(Serialize)]
pub struct AdminDataResponse {
    pub success: bool,
    pub data: Vec<IdCardRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /admin/data
/// List every stored ID-card request
pub async fn admin_data<R, G, M>(
    State(state): State<Arc<AppState<R, G, M>>>,
    headers: HeaderMap,
) -> Result<Json<AdminDataResponse>, ServiceError>
where
    R: RequestStore,
    G: UploadSigner,
    M: EmailSender,
{
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ServiceError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ServiceError::Unauthorized)?;

    match &state.admin_token {
        Some(expected) if token == expected => {}
        _ => return Err(ServiceError::Forbidden),
    }

    let data = state.store.list_all()?;
    let message = if data.is_empty() {
        Some("No data found".to_string())
    } else {
        None
    };

    Ok(Json(AdminDataResponse {
        success: true,
        data,
        message,
    }))
}
