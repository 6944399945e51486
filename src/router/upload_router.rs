use axum::{Router, routing::post, extract::DefaultBodyLimit};
use std::sync::Arc;
use crate::handler::upload_handler::upload_files_handler;
use crate::service::upload_service::UploadServiceImpl;

/// Upper bound on one multipart upload request.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn upload_router(service: Arc<UploadServiceImpl>) -> Router {
    Router::new()
        .route("/api/upload", post(upload_files_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(service)
}
