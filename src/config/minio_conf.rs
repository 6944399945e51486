use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info, warn};

use crate::config::{parsed_var, required_var, ConfigError};

/// Object storage settings for uploaded project files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinioConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    /// Public base URL the returned file locators are built on
    pub links_prefix: String,
    pub region: Option<String>,
    pub secure: bool,
}

impl MinioConfig {
    /// Reads `MINIO_ENDPOINT`, `MINIO_ACCESS_KEY`, `MINIO_SECRET_KEY` and
    /// `MINIO_BUCKET_NAME` (all required) plus the optional `MINIO_REGION`,
    /// `MINIO_SECURE` and `MINIO_LINKS_PREFIX`.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading object storage configuration from environment variables");
        let defaults = MinioConfig::default();

        let config = Self {
            endpoint: required_var("MINIO_ENDPOINT")?,
            access_key: required_var("MINIO_ACCESS_KEY")?,
            secret_key: required_var("MINIO_SECRET_KEY")?,
            bucket_name: required_var("MINIO_BUCKET_NAME")?,
            links_prefix: env::var("MINIO_LINKS_PREFIX").unwrap_or_else(|_| {
                warn!("MINIO_LINKS_PREFIX not set, file links will use {}", defaults.links_prefix);
                defaults.links_prefix.clone()
            }),
            region: env::var("MINIO_REGION").ok().or(defaults.region),
            secure: parsed_var("MINIO_SECURE", false)?,
        };
        debug!(
            endpoint = %config.endpoint,
            bucket = %config.bucket_name,
            secure = config.secure,
            "Object storage settings resolved"
        );

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::ValidationError("Endpoint cannot be empty".to_string()));
        }

        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(ConfigError::ValidationError("MinIO credentials cannot be empty".to_string()));
        }

        if !self.bucket_name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.') {
            return Err(ConfigError::ValidationError(format!(
                "Bucket name {:?} may only hold lowercase letters, digits, '-' and '.'",
                self.bucket_name
            )));
        }

        if self.bucket_name.len() < 3 || self.bucket_name.len() > 63 {
            return Err(ConfigError::ValidationError(format!(
                "Bucket name must be 3 to 63 characters, got {}",
                self.bucket_name.len()
            )));
        }

        Ok(())
    }

    /// Endpoint with scheme, as the S3 client expects it
    pub fn get_endpoint_url(&self) -> String {
        let protocol = if self.secure { "https" } else { "http" };
        format!("{}://{}", protocol, self.endpoint)
    }

    /// Public locator of an object in the configured bucket
    pub fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.links_prefix.trim_end_matches('/'),
            self.bucket_name,
            object_name.trim_start_matches('/')
        )
    }
}

impl Default for MinioConfig {
    fn default() -> Self {
        Self {
            endpoint: "localhost:9000".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            bucket_name: "project-files".to_string(),
            links_prefix: "http://127.0.0.1:9000".to_string(),
            region: Some("us-east-1".to_string()),
            secure: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MinioConfig::default();
        assert_eq!(config.bucket_name, "project-files");
        assert!(!config.secure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_endpoint() {
        let mut config = MinioConfig::default();
        config.endpoint = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_bucket_name() {
        let mut config = MinioConfig::default();
        config.bucket_name = "ab".to_string();
        assert!(config.validate().is_err());

        config.bucket_name = "Project_Files".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_get_endpoint_url() {
        let mut config = MinioConfig::default();
        assert_eq!(config.get_endpoint_url(), "http://localhost:9000");

        config.secure = true;
        assert_eq!(config.get_endpoint_url(), "https://localhost:9000");
    }

    #[test]
    fn test_public_url_joins_prefix_bucket_and_object() {
        let mut config = MinioConfig::default();
        config.links_prefix = "https://cdn.example.com/".to_string();
        assert_eq!(
            config.public_url("uploads/1700000000000-abcd1234.pdf"),
            "https://cdn.example.com/project-files/uploads/1700000000000-abcd1234.pdf"
        );
    }
}
