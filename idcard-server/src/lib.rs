//! ID-Card Request Service
//!
//! The HTTP service behind the ID-card request site: mints signed
//! upload targets for passport photos, persists submitted requests,
//! relays contact-form mail, and serves the stored records to an
//! authenticated admin.

pub mod config;
pub mod email;
pub mod error;
pub mod routes;
pub mod signer;
pub mod state;
pub mod store;

pub use config::{load_or_generate_keypair, Config, StorageConfig};
pub use email::{ConsoleMailer, ContactMessage, EmailSender, SmtpConfig, SmtpMailer};
pub use error::ServiceError;
pub use signer::{SignedUpload, StaticSigner, UploadSigner, UrlSigner};
pub use state::AppState;
pub use store::{InMemoryRequestStore, RequestStore, SqliteStore};
