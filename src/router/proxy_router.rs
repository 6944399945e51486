use axum::{Router, routing::{get, post}};
use std::sync::Arc;
use crate::handler::autocomplete_handler::autocomplete_handler;
use crate::handler::estimate_handler::estimate_handler;
use crate::service::autocomplete_service::AutocompleteServiceImpl;
use crate::service::estimate_service::EstimateServiceImpl;

/// Routes forwarding to third-party providers.
pub fn proxy_router(autocomplete: Arc<AutocompleteServiceImpl>, estimates: Arc<EstimateServiceImpl>) -> Router {
    let autocomplete_routes = Router::new()
        .route("/api/autocomplete", get(autocomplete_handler))
        .with_state(autocomplete);

    let estimate_routes = Router::new()
        .route("/api/estimate", post(estimate_handler))
        .with_state(estimates);

    autocomplete_routes.merge(estimate_routes)
}
