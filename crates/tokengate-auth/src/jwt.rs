//! HS512 token codec.
//!
//! [`TokenCodec`] turns an identity into a signed compact JWT and back.
//! Decoding reports *why* a token was refused through [`TokenRejection`],
//! but nothing outside the request pipeline acts on the reason:
//! [`TokenCodec::validate`] collapses every rejection to `false` and only
//! logs the category.
//!
//! Checks run in a fixed order: structure, declared algorithm, signature,
//! and only then expiry. Expiry is compared with zero leeway.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation, decode, decode_header, encode};
use thiserror::Error;
use tokengate_config::JwtConfig;

use crate::claims::{IdentityClaims, TokenClaims, normalize_authorities};
use crate::key::{KeyError, SigningKey};

pub const ALGORITHM: Algorithm = Algorithm::HS512;

/// Why a token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("malformed JWT token")]
    Malformed,
    #[error("invalid JWT signature")]
    SignatureMismatch,
    #[error("expired JWT token")]
    Expired,
    #[error("unsupported JWT token")]
    UnsupportedAlgorithm,
}

impl TokenRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenRejection::Malformed => "malformed",
            TokenRejection::SignatureMismatch => "signature_mismatch",
            TokenRejection::Expired => "expired",
            TokenRejection::UnsupportedAlgorithm => "unsupported_algorithm",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenRejection {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenRejection::SignatureMismatch,
            ErrorKind::ExpiredSignature => TokenRejection::Expired,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat => TokenRejection::UnsupportedAlgorithm,
            _ => TokenRejection::Malformed,
        }
    }
}

/// Failure to mint a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token subject must not be empty")]
    EmptySubject,
    #[error("token validity pushes the expiry out of range")]
    ExpiryOverflow,
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Encodes and verifies bearer tokens against one immutable signing key.
///
/// Cloning is cheap; every clone shares the same key.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    key: Arc<SigningKey>,
    validity: Duration,
    validation: Arc<Validation>,
}

impl TokenCodec {
    /// `validity_seconds` beyond what a [`Duration`] can hold saturates; such
    /// a codec then refuses to mint with [`TokenError::ExpiryOverflow`].
    pub fn new(key: SigningKey, validity_seconds: i64) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: Arc::new(key),
            validity: Duration::try_seconds(validity_seconds).unwrap_or(Duration::MAX),
            validation: Arc::new(validation),
        }
    }

    /// Decodes the configured base64 secret. Call once at startup; an error
    /// here must stop the process.
    pub fn from_config(config: &JwtConfig) -> Result<Self, KeyError> {
        let key = SigningKey::from_base64(&config.secret)?;
        Ok(Self::new(key, config.token_validity_seconds))
    }

    pub fn validity_seconds(&self) -> i64 {
        self.validity.num_seconds()
    }

    pub fn encode<I, S>(&self, subject: &str, authorities: I) -> Result<String, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.encode_at(subject, authorities, Utc::now())
    }

    /// Same as [`encode`](Self::encode) with an explicit issue time. The
    /// output is fully determined by its inputs.
    pub fn encode_at<I, S>(
        &self,
        subject: &str,
        authorities: I,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if subject.trim().is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let expires_at = issued_at
            .checked_add_signed(self.validity)
            .ok_or(TokenError::ExpiryOverflow)?;

        let claims = IdentityClaims {
            subject: subject.to_string(),
            authorities: normalize_authorities(authorities),
            issued_at: issued_at.timestamp(),
            expires_at: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(ALGORITHM),
            &TokenClaims::from(&claims),
            self.key.encoding(),
        )?;

        Ok(token)
    }

    /// Verifies `token` and returns its claims, or the reason it was refused.
    pub fn decode(&self, token: &str) -> Result<IdentityClaims, TokenRejection> {
        let header = decode_header(token)?;
        if header.alg != ALGORITHM {
            return Err(TokenRejection::UnsupportedAlgorithm);
        }

        let data = decode::<TokenClaims>(token, self.key.decoding(), &self.validation)?;

        if data.claims.sub.trim().is_empty() {
            return Err(TokenRejection::Malformed);
        }

        Ok(data.claims.into())
    }

    /// True only for a well-formed, correctly signed, unexpired token. The
    /// rejection category is logged and otherwise discarded.
    pub fn validate(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(_) => true,
            Err(rejection) => {
                tracing::info!(reason = rejection.as_str(), "{}", rejection);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use jsonwebtoken::EncodingKey;

    const VALIDITY: i64 = 3600;

    fn secret_bytes() -> Vec<u8> {
        (0u8..64).collect()
    }

    fn get_test_codec() -> TokenCodec {
        TokenCodec::new(SigningKey::from_bytes(&secret_bytes()).unwrap(), VALIDITY)
    }

    fn other_codec() -> TokenCodec {
        TokenCodec::new(SigningKey::from_bytes(&[9u8; 64]).unwrap(), VALIDITY)
    }

    fn replace_segment(token: &str, index: usize, segment: &str) -> String {
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[index] = segment;
        parts.join(".")
    }

    #[test]
    fn test_round_trip() {
        let codec = get_test_codec();
        let issued_at = Utc::now();

        let token = codec
            .encode_at("alice", ["ROLE_USER", "ROLE_ADMIN"], issued_at)
            .unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(
            claims,
            IdentityClaims {
                subject: "alice".to_string(),
                authorities: vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()],
                issued_at: issued_at.timestamp(),
                expires_at: issued_at.timestamp() + VALIDITY,
            }
        );
    }

    #[test]
    fn test_round_trip_without_authorities() {
        let codec = get_test_codec();

        let token = codec.encode("bob", Vec::<String>::new()).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.subject, "bob");
        assert!(claims.authorities.is_empty());
    }

    #[test]
    fn test_encode_is_deterministic_for_same_timestamp() {
        let codec = get_test_codec();
        let issued_at = Utc::now();

        let first = codec.encode_at("alice", ["ROLE_USER"], issued_at).unwrap();
        let second = codec.encode_at("alice", ["ROLE_USER"], issued_at).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_rejects_empty_subject() {
        let codec = get_test_codec();

        assert!(matches!(
            codec.encode("  ", ["ROLE_USER"]),
            Err(TokenError::EmptySubject)
        ));
    }

    #[test]
    fn test_huge_validity_fails_to_encode() {
        let codec = TokenCodec::new(
            SigningKey::from_bytes(&secret_bytes()).unwrap(),
            100_000_000_000_000,
        );

        assert!(matches!(
            codec.encode("alice", ["ROLE_USER"]),
            Err(TokenError::ExpiryOverflow)
        ));
    }

    #[test]
    fn test_max_validity_does_not_panic() {
        let codec = TokenCodec::new(SigningKey::from_bytes(&secret_bytes()).unwrap(), i64::MAX);

        assert!(matches!(
            codec.encode("alice", ["ROLE_USER"]),
            Err(TokenError::ExpiryOverflow)
        ));
    }

    #[test]
    fn test_header_declares_hs512() {
        let codec = get_test_codec();
        let token = codec.encode("alice", ["ROLE_USER"]).unwrap();

        let header = decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS512);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_payload_carries_joined_auth_claim() {
        let codec = get_test_codec();
        let token = codec.encode("alice", ["ROLE_USER", "ROLE_ADMIN"]).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();

        assert_eq!(json["sub"], "alice");
        assert_eq!(json["auth"], "ROLE_USER,ROLE_ADMIN");
        assert!(json["exp"].as_i64().unwrap() > json["iat"].as_i64().unwrap());
    }

    #[test]
    fn test_every_signature_bit_flip_is_rejected() {
        let codec = get_test_codec();
        let token = codec.encode("alice", ["ROLE_USER"]).unwrap();
        let signature = URL_SAFE_NO_PAD
            .decode(token.split('.').nth(2).unwrap())
            .unwrap();

        for byte in 0..signature.len() {
            for bit in 0..8 {
                let mut tampered = signature.clone();
                tampered[byte] ^= 1 << bit;
                let forged = replace_segment(&token, 2, &URL_SAFE_NO_PAD.encode(&tampered));

                assert!(!codec.validate(&forged), "byte {byte} bit {bit} accepted");
                assert_eq!(
                    codec.decode(&forged),
                    Err(TokenRejection::SignatureMismatch)
                );
            }
        }
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = get_test_codec();
        let token = codec.encode("alice", ["ROLE_USER"]).unwrap();

        let forged_claims = serde_json::json!({
            "sub": "alice",
            "auth": "ROLE_USER,ROLE_ADMIN",
            "iat": 0,
            "exp": 9_999_999_999i64,
        });
        let forged = replace_segment(
            &token,
            1,
            &URL_SAFE_NO_PAD.encode(forged_claims.to_string()),
        );

        assert_eq!(
            codec.decode(&forged),
            Err(TokenRejection::SignatureMismatch)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = get_test_codec();
        let issued_at = Utc::now() - Duration::seconds(VALIDITY + 5);

        let token = codec.encode_at("alice", ["ROLE_USER"], issued_at).unwrap();

        assert!(!codec.validate(&token));
        assert_eq!(codec.decode(&token), Err(TokenRejection::Expired));
    }

    #[test]
    fn test_expired_token_with_bad_signature_reports_signature() {
        let codec = get_test_codec();
        let issued_at = Utc::now() - Duration::seconds(VALIDITY + 5);
        let token = other_codec()
            .encode_at("alice", ["ROLE_USER"], issued_at)
            .unwrap();

        assert_eq!(
            codec.decode(&token),
            Err(TokenRejection::SignatureMismatch)
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        let codec = get_test_codec();

        assert!(!codec.validate(""));
        assert!(!codec.validate("not-a-token"));
        assert!(!codec.validate("invalid.token.here"));
        assert_eq!(codec.decode(""), Err(TokenRejection::Malformed));
        assert_eq!(codec.decode("not-a-token"), Err(TokenRejection::Malformed));
    }

    #[test]
    fn test_token_from_different_key_is_rejected() {
        let token = other_codec().encode("alice", ["ROLE_USER"]).unwrap();

        assert!(!get_test_codec().validate(&token));
        assert_eq!(
            get_test_codec().decode(&token),
            Err(TokenRejection::SignatureMismatch)
        );
    }

    #[test]
    fn test_other_algorithm_is_unsupported() {
        let claims = serde_json::json!({
            "sub": "alice",
            "auth": "ROLE_USER",
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 600,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&secret_bytes()),
        )
        .unwrap();

        assert_eq!(
            get_test_codec().decode(&token),
            Err(TokenRejection::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let claims = serde_json::json!({
            "auth": "ROLE_USER",
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 600,
        });
        let token = encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(&secret_bytes()),
        )
        .unwrap();

        assert!(get_test_codec().decode(&token).is_err());
    }

    #[test]
    fn test_from_config_decodes_secret() {
        let config = JwtConfig::new(
            base64::engine::general_purpose::STANDARD.encode(secret_bytes()),
            60,
        );

        let codec = TokenCodec::from_config(&config).unwrap();
        let token = codec.encode("alice", ["ROLE_USER"]).unwrap();

        assert_eq!(codec.validity_seconds(), 60);
        assert!(get_test_codec().validate(&token));
    }

    #[test]
    fn test_from_config_rejects_short_secret() {
        let config = JwtConfig::new("c2hvcnQ=", 60);

        assert!(matches!(
            TokenCodec::from_config(&config),
            Err(KeyError::TooShort(_))
        ));
    }
}
