pub mod app_conf;
pub mod mongo_conf;
pub mod minio_conf;
pub mod geoapify_conf;
pub mod gemini_conf;
pub mod crm_conf;

pub use app_conf::AppConfig;
pub use mongo_conf::MongoConfig;
pub use minio_conf::MinioConfig;
pub use geoapify_conf::GeoapifyConfig;
pub use gemini_conf::GeminiConfig;
pub use crm_conf::CrmConfig;

use std::env;
use std::str::FromStr;
use tracing::{debug, error};

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Value of a variable that has no sensible default.
pub(crate) fn required_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| {
        error!("{} environment variable not found", name);
        ConfigError::EnvVarNotFound(name.to_string())
    })
}

/// Parsed value of an optional variable; unset means `default`, garbage is an error.
pub(crate) fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            error!("Invalid {} value: {}", name, raw);
            ConfigError::ParseError(format!("Invalid {} value: {}", name, raw))
        }),
        Err(_) => {
            debug!("{} not set, using default", name);
            Ok(default)
        }
    }
}
