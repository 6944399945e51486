use crate::config::GeoapifyConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    #[error("Geocoding API key is not configured")]
    MissingApiKey,

    #[error("Geocoding provider returned HTTP {status}")]
    Upstream { status: u16 },

    #[error("Geocoding request failed: {0}")]
    Transport(String),
}

/// Address suggestion provider.
#[async_trait]
pub trait AddressSuggester: Send + Sync {
    /// Raw suggestion objects for a partial address.
    async fn suggest(&self, text: &str) -> Result<Vec<Value>, GeocodingError>;
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    results: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct GeoapifyClient {
    http: reqwest::Client,
    config: GeoapifyConfig,
}

impl GeoapifyClient {
    pub fn new(config: GeoapifyConfig) -> Result<Self, GeocodingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::Transport(format!("Client creation failed: {}", e)))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/geocode/autocomplete", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AddressSuggester for GeoapifyClient {
    #[instrument(skip(self), fields(text_len = text.len()))]
    async fn suggest(&self, text: &str) -> Result<Vec<Value>, GeocodingError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            error!("GEOAPIFY_API_KEY is not configured");
            GeocodingError::MissingApiKey
        })?;

        debug!("Requesting address suggestions");
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("text", text), ("format", "json"), ("apiKey", api_key)])
            .send()
            .await
            .map_err(|e| {
                error!("Geocoding request failed: {}", e);
                GeocodingError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Geocoding provider returned HTTP {}", status);
            return Err(GeocodingError::Upstream { status: status.as_u16() });
        }

        let body: AutocompleteResponse = response.json().await.map_err(|e| {
            error!("Failed to decode geocoding response: {}", e);
            GeocodingError::Transport(e.to_string())
        })?;

        info!("Received {} address suggestions", body.results.len());
        Ok(body.results)
    }
}
