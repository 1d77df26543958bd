//! Service configuration

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

use crate::error::ServiceError;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// SQLite database file; in-memory store when unset
    pub database_path: Option<String>,

    /// Directory the marketing site is served from
    pub static_dir: String,

    /// File holding the upload-URL signing key
    pub key_file: String,

    /// Object storage the signed upload URLs target
    pub storage: StorageConfig,

    /// Bearer credential for the admin read path
    pub admin_token: Option<String>,

    /// Whether a second request with a known identifier is refused
    pub reject_duplicate_identifiers: bool,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Endpoint the signed write URLs point at
    pub endpoint: String,

    /// Base of the publicly readable URLs
    pub public_base: String,

    /// Bucket holding the uploaded photos
    pub bucket: String,
}

impl Config {
    /// Create config from environment variables
    ///
    /// Optional:
    /// - PORT (default: 3000)
    /// - DATABASE_PATH (default: in-memory store)
    /// - STATIC_DIR (default: "static")
    /// - KEY_FILE (default: "signing.key")
    /// - STORAGE_ENDPOINT, STORAGE_PUBLIC_BASE, STORAGE_BUCKET
    /// - ADMIN_TOKEN (admin read path refuses everything when unset)
    /// - REJECT_DUPLICATE_IDENTIFIERS ("1" or "true")
    pub fn from_env() -> Self {
        // Helper to get non-empty env var
        fn get_env(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.is_empty())
        }

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let endpoint = get_env("STORAGE_ENDPOINT")
            .unwrap_or_else(|| "https://storage.googleapis.com".to_string());
        let public_base = get_env("STORAGE_PUBLIC_BASE").unwrap_or_else(|| endpoint.clone());
        let bucket = get_env("STORAGE_BUCKET").unwrap_or_else(|| "idcard-photos".to_string());

        let reject_duplicate_identifiers = get_env("REJECT_DUPLICATE_IDENTIFIERS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            port,
            database_path: get_env("DATABASE_PATH"),
            static_dir: get_env("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            key_file: get_env("KEY_FILE").unwrap_or_else(|| "signing.key".to_string()),
            storage: StorageConfig {
                endpoint,
                public_base,
                bucket,
            },
            admin_token: get_env("ADMIN_TOKEN"),
            reject_duplicate_identifiers,
        }
    }
}

/// Load the signing key from a file, generating one on first start
pub fn load_or_generate_keypair(path: &str) -> Result<SigningKey, ServiceError> {
    if let Ok(contents) = std::fs::read_to_string(path) {
        let bytes = URL_SAFE_NO_PAD
            .decode(contents.trim())
            .map_err(|e| ServiceError::Internal(format!("invalid key file {}: {}", path, e)))?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ServiceError::Internal("signing key must be 32 bytes".to_string()))?;
        return Ok(SigningKey::from_bytes(&seed));
    }

    let signing_key = SigningKey::generate(&mut OsRng);
    std::fs::write(path, URL_SAFE_NO_PAD.encode(signing_key.as_bytes()))
        .map_err(|e| ServiceError::Internal(format!("failed to write key file {}: {}", path, e)))?;
    tracing::info!(path = %path, "Generated new signing keypair");

    Ok(signing_key)
}
