use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::dto::submission_dto::AutocompleteQuery;
use crate::service::autocomplete_service::AutocompleteServiceImpl;
use crate::util::geoapify::GeocodingError;

/// Suggestions on success; `{"error": ...}` otherwise, keeping the provider's
/// status when it answered with a failure.
pub async fn autocomplete_handler(
    State(service): State<Arc<AutocompleteServiceImpl>>,
    Query(query): Query<AutocompleteQuery>,
) -> Response {
    match service.suggest(&query.text).await {
        Ok(suggestions) => Json(suggestions).into_response(),
        Err(e) => {
            error!("[autocomplete_handler] {}", e);
            let (status, message) = match e {
                GeocodingError::MissingApiKey => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
                }
                GeocodingError::Upstream { status } => (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    "Failed to fetch address suggestions",
                ),
                GeocodingError::Transport(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            };
            (status, Json(json!({ "error": message }))).into_response()
        }
    }
}
