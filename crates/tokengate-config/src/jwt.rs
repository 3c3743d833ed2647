use std::env;
use std::fmt;

use crate::error::ConfigError;

pub const JWT_SECRET: &str = "JWT_SECRET";
pub const JWT_TOKEN_VALIDITY_SECONDS: &str = "JWT_TOKEN_VALIDITY_SECONDS";

/// Longest accepted token lifetime: ten years.
pub const MAX_TOKEN_VALIDITY_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// Token signing settings.
///
/// `secret` is the base64 text exactly as configured; decoding it into key
/// material is the auth crate's job. Both values are mandatory.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_validity_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, token_validity_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            token_validity_seconds,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var(JWT_SECRET).ok(),
            env::var(JWT_TOKEN_VALIDITY_SECONDS).ok(),
        )
    }

    fn from_values(secret: Option<String>, validity: Option<String>) -> Result<Self, ConfigError> {
        let secret = secret
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(JWT_SECRET))?;

        let validity = validity.ok_or(ConfigError::Missing(JWT_TOKEN_VALIDITY_SECONDS))?;
        let token_validity_seconds: i64 = validity.trim().parse().map_err(|_| {
            ConfigError::invalid(JWT_TOKEN_VALIDITY_SECONDS, "expected an integer")
        })?;

        if token_validity_seconds <= 0 {
            return Err(ConfigError::invalid(
                JWT_TOKEN_VALIDITY_SECONDS,
                "must be greater than zero",
            ));
        }

        if token_validity_seconds > MAX_TOKEN_VALIDITY_SECONDS {
            return Err(ConfigError::invalid(
                JWT_TOKEN_VALIDITY_SECONDS,
                "must not exceed ten years",
            ));
        }

        Ok(Self {
            secret,
            token_validity_seconds,
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_validity_seconds", &self.token_validity_seconds)
            .finish()
    }
}
