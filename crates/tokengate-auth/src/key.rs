//! HMAC signing key material.
//!
//! The key is decoded from base64 exactly once at startup. HS512 requires a
//! key at least as long as its 512-bit digest; shorter secrets are refused.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{DecodingKey, EncodingKey};
use thiserror::Error;

/// Minimum decoded secret length for HS512, in bytes.
pub const MIN_SECRET_BYTES: usize = 64;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("signing secret is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("signing secret must decode to at least {MIN_SECRET_BYTES} bytes for HS512, got {0}")]
    TooShort(usize),
}

/// Symmetric key used both to sign and to verify tokens.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    pub fn from_base64(secret: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD.decode(secret.trim())?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(KeyError::TooShort(bytes.len()));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        })
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
