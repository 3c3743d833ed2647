//! # Tokengate Core
//!
//! Foundational types shared by every Tokengate crate:
//!
//! - [`errors`]: the HTTP-facing [`AppError`] type
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use tokengate_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("correct horse")?;
//! if !verify_password("correct horse", &hash)? {
//!     return Err(AppError::unauthorized(anyhow::anyhow!("Invalid username or password")));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, hash_password_with_cost, verify_password};
