use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::dto::submission_dto::{
    CreateSubmissionRequest, SubmissionListResponse, SubmissionResponse, UpdateSubmissionRequest,
};
use crate::service::submission_service::SubmissionService;
use crate::util::error::{HandlerError, ServiceError};

pub type SubmissionState = Arc<dyn SubmissionService>;

// Handler: List submissions, most recent first
pub async fn list_submissions_handler(State(service): State<SubmissionState>) -> Response {
    match service.list_submissions().await {
        Ok(submissions) => Json(SubmissionListResponse {
            success: true,
            error: None,
            count: submissions.len(),
            submissions,
        })
        .into_response(),
        Err(e) => {
            error!("[list_submissions_handler] {}", e);
            let body = SubmissionListResponse {
                success: false,
                error: Some(format!("Failed to fetch submissions: {}", e.message())),
                submissions: Vec::new(),
                count: 0,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

// Handler: Create submission from the quote form
pub async fn create_submission_handler(
    State(service): State<SubmissionState>,
    payload: Result<Json<CreateSubmissionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(request) = payload.map_err(|e| {
        error!("[create_submission_handler] Invalid JSON: {}", e);
        HandlerError::bad_request(format!("Invalid JSON: {}", e.body_text()))
    })?;

    let submission = service.create_submission(request).await.map_err(|e| {
        HandlerError::new(e.handler_kind(), format!("Failed to create submission: {}", e.message()))
    })?;

    info!("[create_submission_handler] Submission stored");
    Ok(Json(SubmissionResponse {
        success: true,
        submission,
        message: "Submission created successfully".to_string(),
    }))
}

// Handler: Partial update from the CRM dashboard
pub async fn update_submission_handler(
    State(service): State<SubmissionState>,
    payload: Result<Json<UpdateSubmissionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(request) = payload.map_err(|e| {
        error!("[update_submission_handler] Invalid JSON: {}", e);
        HandlerError::bad_request(format!("Invalid JSON: {}", e.body_text()))
    })?;

    let submission = service.update_submission(request).await.map_err(|e| match e {
        ServiceError::InvalidInput(msg) => HandlerError::bad_request(msg),
        other => HandlerError::new(other.handler_kind(), format!("Failed to update submission: {}", other.message())),
    })?;

    Ok(Json(SubmissionResponse {
        success: true,
        submission,
        message: "Submission updated successfully".to_string(),
    }))
}
