use axum::{Router, routing::get};
use crate::handler::submission_handler::{
    create_submission_handler,
    list_submissions_handler,
    update_submission_handler,
    SubmissionState,
};

pub fn submission_router(service: SubmissionState) -> Router {
    Router::new()
        .route(
            "/api/submissions",
            get(list_submissions_handler)
                .post(create_submission_handler)
                .patch(update_submission_handler),
        )
        .with_state(service)
}
