use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::dto::submission_dto::{UploadFile, UploadResponse};
use crate::service::upload_service::UploadServiceImpl;
use crate::util::error::HandlerError;

pub const FILES_FIELD: &str = "files";

pub async fn upload_files_handler(
    State(service): State<Arc<UploadServiceImpl>>,
    payload: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let mut multipart = payload.map_err(|e| {
        error!("[upload_files_handler] Rejected upload body: {}", e);
        HandlerError::bad_request(e.body_text())
    })?;
    let mut files: Vec<UploadFile> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("[upload_files_handler] Error getting next field: {}", e);
        HandlerError::bad_request(format!("Failed to read upload: {}", e.body_text()))
    })? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        if name != FILES_FIELD {
            debug!("[upload_files_handler] Ignoring field: {}", name);
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
        let content_type = field.content_type().map(|s| s.to_string()).unwrap_or_default();
        let content = field.bytes().await.map_err(|e| {
            error!("[upload_files_handler] Failed to read file {}: {}", filename, e);
            HandlerError::bad_request(format!("Failed to read file {}: {}", filename, e.body_text()))
        })?;

        debug!("[upload_files_handler] Received file: {} ({} bytes)", filename, content.len());
        files.push(UploadFile { filename, content_type, content: content.to_vec() });
    }

    if files.is_empty() {
        return Err(HandlerError::bad_request("No files provided"));
    }

    let count = files.len();
    let urls = service
        .upload_files(files)
        .await
        .map_err(|e| HandlerError::internal(e.to_string()))?;

    info!("[upload_files_handler] Uploaded {} files", count);
    Ok(Json(UploadResponse {
        success: true,
        message: format!("Successfully uploaded {} file(s)", urls.len()),
        urls,
    }))
}
