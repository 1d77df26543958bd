//! Shared application state

use crate::email::EmailSender;
use crate::signer::UploadSigner;
use crate::store::RequestStore;

/// State shared by all route handlers
pub struct AppState<R, G, M> {
    pub store: R,
    pub signer: G,
    pub mailer: M,

    /// Bearer credential the admin read path checks against
    pub admin_token: Option<String>,

    /// Whether a second request with a known identifier gets a 409
    pub reject_duplicate_identifiers: bool,
}

impl<R, G, M> AppState<R, G, M>
where
    R: RequestStore,
    G: UploadSigner,
    M: EmailSender,
{
    pub fn new(
        store: R,
        signer: G,
        mailer: M,
        admin_token: Option<String>,
        reject_duplicate_identifiers: bool,
    ) -> Self {
        Self {
            store,
            signer,
            mailer,
            admin_token,
            reject_duplicate_identifiers,
        }
    }
}
