use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::util::geoapify::{AddressSuggester, GeocodingError};

/// Queries shorter than this are answered locally with no suggestions.
pub const MIN_QUERY_CHARS: usize = 3;

pub struct AutocompleteServiceImpl {
    pub suggester: Arc<dyn AddressSuggester>,
}

impl AutocompleteServiceImpl {
    pub fn new(suggester: Arc<dyn AddressSuggester>) -> Self {
        AutocompleteServiceImpl { suggester }
    }

    #[instrument(skip(self, text), fields(text_len = text.chars().count()))]
    pub async fn suggest(&self, text: &str) -> Result<Vec<Value>, GeocodingError> {
        if text.chars().count() < MIN_QUERY_CHARS {
            debug!("Query too short, skipping provider call");
            return Ok(Vec::new());
        }
        self.suggester.suggest(text).await
    }
}
