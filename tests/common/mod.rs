#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::{Request, StatusCode}, Router};
use bson::oid::ObjectId;
use demolition_backend::app::app::{build_router, AppServices};
use demolition_backend::config::{CrmConfig, GeminiConfig, GeoapifyConfig};
use demolition_backend::dto::submission_dto::SubmissionChanges;
use demolition_backend::model::submission::Submission;
use demolition_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use demolition_backend::repository::submission_repo::SubmissionRepository;
use demolition_backend::service::autocomplete_service::AutocompleteServiceImpl;
use demolition_backend::service::estimate_service::EstimateServiceImpl;
use demolition_backend::service::submission_service::SubmissionServiceImpl;
use demolition_backend::service::upload_service::UploadServiceImpl;
use demolition_backend::util::gemini::GeminiClient;
use demolition_backend::util::geoapify::GeoapifyClient;
use demolition_backend::util::minio::{MinioError, ObjectStore};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Stand-in for the Mongo collection; sorts like the real query does.
#[derive(Default)]
pub struct FakeSubmissionRepository {
    pub rows: Mutex<Vec<Submission>>,
    pub writes: AtomicUsize,
    pub fail_with: Option<String>,
}

impl FakeSubmissionRepository {
    pub fn with_rows(rows: Vec<Submission>) -> Self {
        FakeSubmissionRepository { rows: Mutex::new(rows), ..Default::default() }
    }

    pub fn failing(message: &str) -> Self {
        FakeSubmissionRepository { fail_with: Some(message.to_string()), ..Default::default() }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionRepository for FakeSubmissionRepository {
    async fn list_recent(&self) -> RepositoryResult<Vec<Submission>> {
        if let Some(msg) = &self.fail_with {
            return Err(RepositoryError::DatabaseError(msg.clone()));
        }
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create(&self, submission: Submission) -> RepositoryResult<Submission> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.fail_with {
            return Err(RepositoryError::DatabaseError(msg.clone()));
        }
        let missing = submission.missing_required_fields();
        if !missing.is_empty() {
            return Err(RepositoryError::validation(format!("Missing required fields: {}", missing.join(", "))));
        }
        let mut stored = submission;
        stored.id = Some(ObjectId::new());
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, changes: &SubmissionChanges) -> RepositoryResult<Submission> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id.map(|oid| oid.to_hex()).as_deref() == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No submission found for ID: {}", id)))?;
        if let Some(v) = &changes.status { row.status = Some(v.clone()); }
        if let Some(v) = &changes.notes { row.notes = Some(v.clone()); }
        if let Some(v) = &changes.contacted_at { row.contacted_at = Some(v.clone()); }
        if let Some(v) = &changes.contacted_by { row.contacted_by = Some(v.clone()); }
        if let Some(v) = changes.wants_cash_offer { row.wants_cash_offer = Some(v); }
        if let Some(v) = &changes.ai_estimate { row.ai_estimate = Some(v.clone()); }
        Ok(row.clone())
    }
}

/// Object store that records names and can be told to fail on one call.
#[derive(Default)]
pub struct FakeObjectStore {
    pub stored: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
    pub fail_on_call: Option<usize>,
}

impl FakeObjectStore {
    pub fn failing_on(call: usize) -> Self {
        FakeObjectStore { fail_on_call: Some(call), ..Default::default() }
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put_object(&self, object_name: &str, _data: Vec<u8>, _content_type: Option<&str>) -> Result<(), MinioError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_call == Some(call) {
            return Err(MinioError::OperationError("Upload failed: bucket unavailable".to_string()));
        }
        self.stored.lock().unwrap().push(object_name.to_string());
        Ok(())
    }

    fn public_url(&self, object_name: &str) -> String {
        format!("http://files.test/project-files/{}", object_name)
    }
}

pub fn sample_submission(created_at: &str, email: &str) -> Submission {
    Submission {
        id: Some(ObjectId::new()),
        created_at: Some(created_at.to_string()),
        email: Some(email.to_string()),
        first_name: Some("Casey".to_string()),
        last_name: Some("Nguyen".to_string()),
        phone_number: Some("713-555-0142".to_string()),
        street_address: Some("9 Bayou Rd".to_string()),
        city: Some("Houston".to_string()),
        state: Some("TX".to_string()),
        zip_code: Some("77002".to_string()),
        full_address: Some("9 Bayou Rd, Houston, TX 77002".to_string()),
        status: Some("new".to_string()),
        wants_cash_offer: Some(false),
        ..Default::default()
    }
}

/// Router over fakes; provider clients point at an unroutable address.
pub fn app_with(repo: Arc<FakeSubmissionRepository>, store: Arc<FakeObjectStore>) -> Router {
    let offline = GeoapifyConfig {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
    };
    let gemini = GeminiConfig {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
        ..Default::default()
    };
    let services = AppServices {
        submissions: Arc::new(SubmissionServiceImpl::new(repo, CrmConfig::default())),
        uploads: Arc::new(UploadServiceImpl::new(store)),
        estimates: Arc::new(EstimateServiceImpl::new(Arc::new(GeminiClient::new(gemini).unwrap()))),
        autocomplete: Arc::new(AutocompleteServiceImpl::new(Arc::new(GeoapifyClient::new(offline).unwrap()))),
    };
    build_router(services)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
