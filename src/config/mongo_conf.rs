use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info};

use crate::config::{parsed_var, required_var, ConfigError};

/// MongoDB configuration for the submission store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Collection holding lead submissions
    pub submission_collection: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load from `MONGO_URI` and `MONGO_DATABASE` (required), optional
    /// `MONGO_USERNAME`/`MONGO_PASSWORD`, and `MONGO_SUBMISSION_COLLECTION`,
    /// `MONGO_POOL_SIZE`, `MONGO_CONNECTION_TIMEOUT` with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");
        let defaults = MongoConfig::default();

        let config = MongoConfig {
            uri: required_var("MONGO_URI")?,
            database: required_var("MONGO_DATABASE")?,
            username: env::var("MONGO_USERNAME").ok(),
            password: env::var("MONGO_PASSWORD").ok(),
            submission_collection: env::var("MONGO_SUBMISSION_COLLECTION")
                .unwrap_or(defaults.submission_collection),
            pool_size: parsed_var("MONGO_POOL_SIZE", defaults.pool_size)?,
            connection_timeout_secs: parsed_var("MONGO_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?,
        };
        debug!(
            database = %config.database,
            collection = %config.submission_collection,
            authenticated = config.username.is_some(),
            "MongoDB settings resolved"
        );

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "test_db".to_string(),
            username: None,
            password: None,
            submission_collection: "test_submissions".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if self.database.is_empty() {
            error!("MongoDB database is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        if self.submission_collection.is_empty() {
            error!("MongoDB submission collection is empty");
            return Err(ConfigError::ValidationError(
                "MongoDB submission collection cannot be empty".to_string(),
            ));
        }

        if self.pool_size == 0 {
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "MongoDB connection timeout must be greater than 0".to_string(),
            ));
        }

        // Credentials travel as a pair
        match (&self.username, &self.password) {
            (Some(user), _) if user.is_empty() => Err(ConfigError::ValidationError(
                "MongoDB username cannot be empty if set".to_string(),
            )),
            (_, Some(pass)) if pass.is_empty() => Err(ConfigError::ValidationError(
                "MongoDB password cannot be empty if set".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "demolition".to_string(),
            username: None,
            password: None,
            submission_collection: "submissions".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MongoConfig::default();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "demolition");
        assert_eq!(config.submission_collection, "submissions");
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.connection_timeout_secs, 5);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(MongoConfig::from_test_env().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_uri() {
        let mut config = MongoConfig::from_test_env();
        config.uri = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_collection() {
        let mut config = MongoConfig::from_test_env();
        config.submission_collection = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_pool_size() {
        let mut config = MongoConfig::from_test_env();
        config.pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_password() {
        let mut config = MongoConfig::from_test_env();
        config.username = Some("crm".to_string());
        config.password = Some(String::new());
        assert!(config.validate().is_err());
    }
}
