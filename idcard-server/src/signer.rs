//! Signed upload URL generation
//!
//! Mints the write authorization half of the direct-to-storage upload:
//! a time-limited, content-type-pinned URL the client PUTs the bytes
//! to, paired with the public URL where the object becomes readable.
//! Both always reference the same destination key.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier};

use crate::error::ServiceError;

/// How long a minted upload URL stays valid
pub const UPLOAD_URL_TTL_MINUTES: i64 = 15;

/// A write authorization paired with its eventual read location
#[derive(Debug, Clone)]
pub struct SignedUpload {
    pub upload_url: String,
    pub public_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Mints signed upload targets for destination keys
pub trait UploadSigner: Send + Sync {
    fn sign(&self, object_key: &str, content_type: &str) -> Result<SignedUpload, ServiceError>;
}

/// Ed25519-backed signer targeting an object storage endpoint
pub struct UrlSigner {
    signing_key: SigningKey,
    storage_endpoint: String,
    public_base: String,
    bucket: String,
}

impl UrlSigner {
    pub fn new(
        signing_key: SigningKey,
        storage_endpoint: impl Into<String>,
        public_base: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            signing_key,
            storage_endpoint: storage_endpoint.into(),
            public_base: public_base.into(),
            bucket: bucket.into(),
        }
    }

    /// The exact bytes the signature covers: method, key, pinned
    /// content type, and expiry
    fn message(object_key: &str, content_type: &str, expires: i64) -> String {
        format!("PUT\n{}\n{}\n{}", object_key, content_type, expires)
    }

    /// Check a previously minted authorization
    ///
    /// Valid iff the expiry window has not elapsed and the signature
    /// matches the key, content type and expiry it was minted for.
    pub fn verify(
        &self,
        object_key: &str,
        content_type: &str,
        expires: i64,
        signature: &str,
        now: DateTime<Utc>,
    ) -> bool {
        if now.timestamp() > expires {
            return false;
        }
        let Ok(bytes) = URL_SAFE_NO_PAD.decode(signature) else {
            return false;
        };
        let bytes: [u8; 64] = match bytes.as_slice().try_into() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let signature = Signature::from_bytes(&bytes);
        let message = Self::message(object_key, content_type, expires);
        self.signing_key
            .verifying_key()
            .verify(message.as_bytes(), &signature)
            .is_ok()
    }
}

impl UploadSigner for UrlSigner {
    fn sign(&self, object_key: &str, content_type: &str) -> Result<SignedUpload, ServiceError> {
        let expires_at = Utc::now() + Duration::minutes(UPLOAD_URL_TTL_MINUTES);
        let expires = expires_at.timestamp();

        let signature = self
            .signing_key
            .sign(Self::message(object_key, content_type, expires).as_bytes());
        let encoded = URL_SAFE_NO_PAD.encode(signature.to_bytes());

        let upload_url = format!(
            "{}/{}/{}?expires={}&signature={}",
            self.storage_endpoint, self.bucket, object_key, expires, encoded
        );
        let public_url = format!("{}/{}/{}", self.public_base, self.bucket, object_key);

        Ok(SignedUpload {
            upload_url,
            public_url,
            expires_at,
        })
    }
}

/// Deterministic signer for tests and local development
pub struct StaticSigner {
    storage_endpoint: String,
    public_base: String,
    bucket: String,
}

impl StaticSigner {
    pub fn new(
        storage_endpoint: impl Into<String>,
        public_base: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            storage_endpoint: storage_endpoint.into(),
            public_base: public_base.into(),
            bucket: bucket.into(),
        }
    }
}

impl UploadSigner for StaticSigner {
    fn sign(&self, object_key: &str, _content_type: &str) -> Result<SignedUpload, ServiceError> {
        let expires_at = Utc::now() + Duration::minutes(UPLOAD_URL_TTL_MINUTES);
        Ok(SignedUpload {
            upload_url: format!(
                "{}/{}/{}?expires={}&signature=unsigned",
                self.storage_endpoint,
                self.bucket,
                object_key,
                expires_at.timestamp()
            ),
            public_url: format!("{}/{}/{}", self.public_base, self.bucket, object_key),
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn test_signer() -> UrlSigner {
        UrlSigner::new(
            SigningKey::generate(&mut OsRng),
            "https://storage.test",
            "https://public.test",
            "photos",
        )
    }

    fn signature_param(url: &str) -> &str {
        url.split("signature=").nth(1).unwrap()
    }

    #[test]
    fn test_signed_urls_reference_same_key() {
        let signer = test_signer();
        let signed = signer.sign("uploads/Ada_Lovelace_20250101_abc.png", "image/png").unwrap();

        assert!(signed
            .upload_url
            .starts_with("https://storage.test/photos/uploads/Ada_Lovelace_20250101_abc.png?"));
        assert_eq!(
            signed.public_url,
            "https://public.test/photos/uploads/Ada_Lovelace_20250101_abc.png"
        );
    }

    #[test]
    fn test_authorization_window_is_fifteen_minutes() {
        let signer = test_signer();
        let signed = signer.sign("uploads/key.png", "image/png").unwrap();

        let ttl = signed.expires_at - Utc::now();
        assert!(ttl <= Duration::minutes(15));
        assert!(ttl > Duration::minutes(14));
    }

    #[test]
    fn test_signature_verifies() {
        let signer = test_signer();
        let signed = signer.sign("uploads/key.png", "image/png").unwrap();
        let signature = signature_param(&signed.upload_url);

        assert!(signer.verify(
            "uploads/key.png",
            "image/png",
            signed.expires_at.timestamp(),
            signature,
            Utc::now(),
        ));
    }

    #[test]
    fn test_signature_pins_key_and_content_type() {
        let signer = test_signer();
        let signed = signer.sign("uploads/key.png", "image/png").unwrap();
        let signature = signature_param(&signed.upload_url);
        let expires = signed.expires_at.timestamp();

        // A different destination key fails
        assert!(!signer.verify("uploads/other.png", "image/png", expires, signature, Utc::now()));
        // A different content type fails
        assert!(!signer.verify("uploads/key.png", "image/gif", expires, signature, Utc::now()));
    }

    #[test]
    fn test_expired_authorization_rejected() {
        let signer = test_signer();
        let signed = signer.sign("uploads/key.png", "image/png").unwrap();
        let signature = signature_param(&signed.upload_url);

        let after_expiry = signed.expires_at + Duration::seconds(1);
        assert!(!signer.verify(
            "uploads/key.png",
            "image/png",
            signed.expires_at.timestamp(),
            signature,
            after_expiry,
        ));
    }

    #[test]
    fn test_other_keypair_rejected() {
        let signer = test_signer();
        let other = test_signer();
        let signed = signer.sign("uploads/key.png", "image/png").unwrap();
        let signature = signature_param(&signed.upload_url);

        assert!(!other.verify(
            "uploads/key.png",
            "image/png",
            signed.expires_at.timestamp(),
            signature,
            Utc::now(),
        ));
    }
}
