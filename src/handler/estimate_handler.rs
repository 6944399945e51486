use axum::{extract::{rejection::JsonRejection, State}, Json};
use std::sync::Arc;
use tracing::warn;

use crate::dto::submission_dto::{EstimateRequest, EstimateResponse};
use crate::service::estimate_service::{EstimateOutcome, EstimateServiceImpl};

/// Always answers 200; an unusable request or provider failure yields the fallback estimate.
pub async fn estimate_handler(
    State(service): State<Arc<EstimateServiceImpl>>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Json<EstimateResponse> {
    let outcome = match payload {
        Ok(Json(request)) => service.estimate(&request).await,
        Err(e) => {
            warn!("[estimate_handler] Unreadable estimate request: {}", e);
            EstimateOutcome::Fallback
        }
    };
    Json(outcome.into())
}
