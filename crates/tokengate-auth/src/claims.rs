//! Token claim structures.
//!
//! - [`IdentityClaims`]: what callers work with (authorities as a list)
//! - [`TokenClaims`]: the JSON payload actually signed (authorities joined)

use serde::{Deserialize, Serialize};

/// Separator used to join authorities into the `auth` claim.
pub const AUTHORITIES_SEPARATOR: &str = ",";

/// Identity carried by a token.
///
/// `authorities` keeps the caller's order with duplicates and blank entries
/// removed. Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub subject: String,
    pub authorities: Vec<String>,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Signed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TokenClaims {
    pub sub: String,
    /// Comma-joined authorities
    pub auth: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<&IdentityClaims> for TokenClaims {
    fn from(claims: &IdentityClaims) -> Self {
        Self {
            sub: claims.subject.clone(),
            auth: join_authorities(&claims.authorities),
            iat: claims.issued_at,
            exp: claims.expires_at,
        }
    }
}

impl From<TokenClaims> for IdentityClaims {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.sub,
            authorities: split_authorities(&claims.auth),
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

pub fn normalize_authorities<I, S>(authorities: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for authority in authorities {
        let authority = authority.as_ref().trim();
        if authority.is_empty() || normalized.iter().any(|a| a == authority) {
            continue;
        }
        normalized.push(authority.to_string());
    }
    normalized
}

pub fn join_authorities(authorities: &[String]) -> String {
    authorities.join(AUTHORITIES_SEPARATOR)
}

/// Splits the `auth` claim. An empty claim yields no authorities.
pub fn split_authorities(joined: &str) -> Vec<String> {
    normalize_authorities(joined.split(AUTHORITIES_SEPARATOR))
}
