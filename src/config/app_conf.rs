use std::env;
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, warn};

use crate::config::ConfigError;

/// HTTP listener settings
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                warn!("APP_PORT not set or invalid, using default: 8080");
                8080
            });
        debug!("Listener configured for {}:{}", host, port);
        AppConfig { host, port }
    }

    /// Resolve host and port into the address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidValue(format!("Invalid APP_HOST value: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
