//! Contact form endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::email::{ContactMessage, EmailSender};
use crate::error::ServiceError;
use crate::signer::UploadSigner;
use crate::state::AppState;
use crate::store::RequestStore;

#[derive(Deserialize)]
pub struct ContactBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

/// POST /contact
/// Relay a contact-form submission to the site owners
pub async fn submit_contact<R, G, M>(
    State(state): State<Arc<AppState<R, G, M>>>,
    Json(body): Json<ContactBody>,
) -> Result<Json<ContactResponse>, ServiceError>
where
    R: RequestStore,
    G: UploadSigner,
    M: EmailSender,
{
    if body.name.is_empty() || body.email.is_empty() || body.message.is_empty() {
        return Err(ServiceError::MissingFields);
    }

    let message = ContactMessage {
        name: body.name,
        email: body.email,
        phone: body.phone.filter(|p| !p.is_empty()),
        service: body.service.filter(|s| !s.is_empty()),
        message: body.message,
    };

    state.mailer.send_contact(&message).map_err(ServiceError::Mail)?;

    Ok(Json(ContactResponse { success: true }))
}
