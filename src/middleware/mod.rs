//! Request authentication pipeline.
//!
//! The router stacks these in a fixed order, outermost first:
//!
//! 1. request logging
//! 2. CORS
//! 3. [`auth::authentication_gate`]: reads `Authorization: Bearer <token>`,
//!    verifies it and stores a [`SecurityContext`] in the request extensions.
//!    It never rejects.
//! 4. [`access::access_decision`]: resolves the path against the
//!    [`AccessRules`] table and answers a bare `401` when an authenticated
//!    path is reached without a principal.
//! 5. per-route role layers from [`role`], answering a bare `403` when the
//!    principal lacks a required role.
//!
//! # Modules
//!
//! - [`auth`]: the gate, the per-request security context and its extractors
//! - [`access`]: path rules and the access decision middleware
//! - [`role`]: role requirements for individual routes
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! // Only reachable once the gate and decision layer let the request through
//! async fn me(AuthUser(principal): AuthUser) -> String {
//!     principal.username().to_string()
//! }
//! ```

pub mod access;
pub mod auth;
pub mod role;

pub use access::{Access, AccessRules};
pub use auth::SecurityContext;
