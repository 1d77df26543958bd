//! HTTP routes for the ID-card service

mod admin;
mod contact;
mod requests;
mod upload;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::email::EmailSender;
use crate::signer::UploadSigner;
use crate::state::AppState;
use crate::store::RequestStore;

/// Create the router with all routes
pub fn create_router<R, G, M>(state: Arc<AppState<R, G, M>>) -> Router
where
    R: RequestStore + 'static,
    G: UploadSigner + 'static,
    M: EmailSender + 'static,
{
    create_router_with_static_path(state, "static")
}

/// Create the router with a custom static file path
pub fn create_router_with_static_path<R, G, M>(
    state: Arc<AppState<R, G, M>>,
    static_path: &str,
) -> Router
where
    R: RequestStore + 'static,
    G: UploadSigner + 'static,
    M: EmailSender + 'static,
{
    Router::new()
        .route("/upload-authorization", post(upload::authorize_upload))
        .route("/id-requests", post(requests::create_request))
        .route("/contact", post(contact::submit_contact))
        .route("/admin/data", get(admin::admin_data))
        // Serve the marketing site for everything else
        .fallback_service(ServeDir::new(static_path))
        .with_state(state)
}
