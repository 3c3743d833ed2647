use std::env;
use std::fmt;

use crate::error::ConfigError;

/// User store settings.
///
/// With no `DATABASE_URL` the server keeps users in memory, which is what the
/// test suite and local experiments use.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub admin: Option<AdminSeed>,
}

/// Administrator created at startup when `ADMIN_USERNAME` and
/// `ADMIN_PASSWORD` are both set.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value.parse().map_err(|_| {
                ConfigError::invalid("DATABASE_MAX_CONNECTIONS", "expected a positive integer")
            })?,
            Err(_) => 5,
        };

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(AdminSeed { username, password }),
            (Ok(_), Err(_)) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            _ => None,
        };

        Ok(Self {
            database_url,
            max_connections,
            admin,
        })
    }
}
