//! Well-known authority names.

/// Granted to every account at signup.
pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Authorities given to a newly registered account.
pub const DEFAULT_AUTHORITIES: &[&str] = &[ROLE_USER];

/// Authorities given to an administrator created by the CLI or startup seed.
pub const ADMIN_AUTHORITIES: &[&str] = &[ROLE_USER, ROLE_ADMIN];
