//! # Tokengate Auth
//!
//! Stateless bearer-token authentication primitives.
//!
//! This crate provides:
//!
//! - [`key`]: the process-wide HMAC [`SigningKey`], decoded once from base64
//! - [`claims`]: [`IdentityClaims`] and their wire representation
//! - [`jwt`]: the HS512 [`TokenCodec`] (encode, decode, validate)
//! - [`principal`]: the [`Principal`] rebuilt from a validated token
//! - [`roles`]: well-known authority names
//!
//! # Token Format
//!
//! Tokens are compact JWS strings signed with HS512. The payload carries the
//! username as `sub`, the granted roles comma-joined under `auth`, and `iat`
//! / `exp` as unix seconds. The server keeps no record of issued tokens; a
//! token is good until its `exp` passes.
//!
//! # Example
//!
//! ```ignore
//! use tokengate_auth::{TokenCodec, roles::ROLE_USER};
//! use tokengate_config::JwtConfig;
//!
//! let codec = TokenCodec::from_config(&JwtConfig::from_env()?)?;
//!
//! let token = codec.encode("alice", [ROLE_USER])?;
//! let claims = codec.decode(&token)?;
//! assert_eq!(claims.subject, "alice");
//! ```

pub mod claims;
pub mod jwt;
pub mod key;
pub mod principal;
pub mod roles;

pub use claims::IdentityClaims;
pub use jwt::{TokenCodec, TokenError, TokenRejection};
pub use key::{KeyError, SigningKey};
pub use principal::Principal;
