use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, CrmConfig, GeminiConfig, GeoapifyConfig, MinioConfig, MongoConfig};
use crate::repository::submission_repo::MongoSubmissionRepository;
use crate::router::proxy_router::proxy_router;
use crate::router::submission_router::submission_router;
use crate::router::upload_router::upload_router;
use crate::service::autocomplete_service::AutocompleteServiceImpl;
use crate::service::estimate_service::EstimateServiceImpl;
use crate::service::submission_service::{SubmissionService, SubmissionServiceImpl};
use crate::service::upload_service::UploadServiceImpl;
use crate::util::gemini::GeminiClient;
use crate::util::geoapify::GeoapifyClient;
use crate::util::minio::MinioService;

/// Everything the routes need, already wired to their backends.
#[derive(Clone)]
pub struct AppServices {
    pub submissions: Arc<dyn SubmissionService>,
    pub uploads: Arc<UploadServiceImpl>,
    pub estimates: Arc<EstimateServiceImpl>,
    pub autocomplete: Arc<AutocompleteServiceImpl>,
}

/// Full HTTP surface: submissions, uploads, provider proxies and health.
pub fn build_router(services: AppServices) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(submission_router(services.submissions))
        .merge(upload_router(services.uploads))
        .merge(proxy_router(services.autocomplete, services.estimates))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();

        let mongo_config = MongoConfig::from_env()?;
        let minio_config = MinioConfig::from_env()?;
        let geoapify_config = GeoapifyConfig::from_env()?;
        let gemini_config = GeminiConfig::from_env()?;
        let crm_config = CrmConfig::from_env();

        let submission_repo = Arc::new(MongoSubmissionRepository::new(&mongo_config).await?);
        let minio_service = Arc::new(MinioService::new(minio_config).await?);
        let geoapify = Arc::new(GeoapifyClient::new(geoapify_config)?);
        let gemini = Arc::new(GeminiClient::new(gemini_config)?);

        let services = AppServices {
            submissions: Arc::new(SubmissionServiceImpl::new(submission_repo, crm_config)),
            uploads: Arc::new(UploadServiceImpl::new(minio_service)),
            estimates: Arc::new(EstimateServiceImpl::new(gemini)),
            autocomplete: Arc::new(AutocompleteServiceImpl::new(geoapify)),
        };

        Ok(App { config, router: build_router(services) })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.socket_addr()?;
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
