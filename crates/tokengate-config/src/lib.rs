//! # Tokengate Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: signing secret and token lifetime (both required)
//! - [`server`]: bind address
//! - [`store`]: user store backend and optional admin seed
//! - [`cors`]: allowed browser origins
//!
//! Missing or malformed required values surface as [`ConfigError`] so the
//! process refuses to start instead of serving traffic with a bad key.
//!
//! # Example
//!
//! ```ignore
//! use tokengate_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.addr);
//! ```

pub mod cors;
pub mod error;
pub mod jwt;
pub mod server;
pub mod store;

pub use cors::CorsConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use store::{AdminSeed, StoreConfig};

/// Every configuration section the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub store: StoreConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            store: StoreConfig::from_env()?,
            cors: CorsConfig::from_env(),
        })
    }
}
