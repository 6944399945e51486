use std::env;
use tracing::{debug, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Generative-text provider settings used for cost estimates
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Load from GEMINI_API_KEY, GEMINI_BASE_URL, GEMINI_MODEL and GEMINI_TIMEOUT_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading estimate provider configuration from environment variables");

        let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("GEMINI_API_KEY not set, estimates will fall back to the default text");
        }

        let base_url = env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        debug!("Estimate provider: {} ({})", base_url, model);

        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue("Invalid GEMINI_TIMEOUT_SECS value".to_string()))?;

        let config = Self { api_key, base_url, model, timeout_secs };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("Gemini model cannot be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError("Gemini timeout must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_model() {
        let config = GeminiConfig { model: " ".to_string(), ..Default::default() };
        assert!(config.validate().is_err());
    }
}
