use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host: IpAddr = match env::var("HOST") {
            Ok(host) => host
                .parse()
                .map_err(|_| ConfigError::invalid("HOST", "expected an IP address"))?,
            Err(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port: u16 = match env::var("PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", "expected a port number"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
        })
    }
}
