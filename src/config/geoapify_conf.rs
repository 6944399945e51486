use std::env;
use tracing::{debug, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_GEOAPIFY_BASE_URL: &str = "https://api.geoapify.com";

/// Address autocomplete provider settings.
///
/// The API key is optional at boot; requests made without it are answered
/// with a configuration error instead.
#[derive(Debug, Clone)]
pub struct GeoapifyConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeoapifyConfig {
    /// Load from GEOAPIFY_API_KEY, GEOAPIFY_BASE_URL and GEOAPIFY_TIMEOUT_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading geocoding configuration from environment variables");

        let api_key = env::var("GEOAPIFY_API_KEY").ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("GEOAPIFY_API_KEY not set, address autocomplete will be unavailable");
        }

        let base_url = env::var("GEOAPIFY_BASE_URL").unwrap_or_else(|_| DEFAULT_GEOAPIFY_BASE_URL.to_string());
        debug!("Geocoding base URL: {}", base_url);

        let timeout_secs = env::var("GEOAPIFY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue("Invalid GEOAPIFY_TIMEOUT_SECS value".to_string()))?;

        let config = Self { api_key, base_url, timeout_secs };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Geocoding base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError("Geocoding timeout must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl Default for GeoapifyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEOAPIFY_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}
